use read_fonts::types::{F2Dot14, Fixed, Tag};
use skrifa::{
    FontRef, GlyphId, MetadataProvider,
    charmap::Charmap,
    metrics::GlyphMetrics,
    prelude::{LocationRef, Size},
    raw::{FileRef, ReadError, TableProvider},
    string::StringId,
};
use vfview_core::{AdvanceProvider, Axis, FontError, FontFace, GlyphRef, Result, SizeMetrics};

fn parse_error(e: ReadError) -> FontError {
    FontError::Parse(e.to_string())
}

/// One face of an in-memory font file.
///
/// The file bytes are owned by the face; tables are re-read on demand.
pub struct SkrifaFace {
    data: Vec<u8>,
    index: u32,
    face_count: u32,
    ppem: f32,
    hinting: bool,
    user_coords: Vec<Fixed>,
    location: Vec<F2Dot14>,
}

impl SkrifaFace {
    /// Open face `index` of `data`, a font or a font collection.
    pub fn from_data(data: Vec<u8>, index: u32) -> Result<Self> {
        let face_count = match FileRef::new(&data).map_err(parse_error)? {
            FileRef::Font(_) => 1,
            FileRef::Collection(collection) => collection.len(),
        };
        if index >= face_count {
            return Err(FontError::FaceIndex { index, count: face_count });
        }
        FontRef::from_index(&data, index).map_err(parse_error)?;

        let mut face = Self {
            data,
            index,
            face_count,
            ppem: 0.0,
            hinting: false,
            user_coords: Vec::new(),
            location: Vec::new(),
        };
        let defaults = face.default_coords();
        face.set_variation_coordinates(&defaults)?;
        Ok(face)
    }

    fn font(&self) -> std::result::Result<FontRef<'_>, ReadError> {
        FontRef::from_index(&self.data, self.index)
    }

    /// Normalized coordinates after `avar` mapping, one per declared axis.
    pub fn location(&self) -> &[F2Dot14] {
        &self.location
    }

    fn default_coords(&self) -> Vec<Fixed> {
        self.font()
            .map(|font| {
                font.axes()
                    .iter()
                    .map(|axis| Fixed::from_f64(axis.default_value() as f64))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn name(&self, id: StringId) -> String {
        self.font()
            .ok()
            .and_then(|font| font.localized_strings(id).english_or_first())
            .map(|name| name.to_string())
            .unwrap_or_default()
    }
}

impl FontFace for SkrifaFace {
    type Advances<'a> = SkrifaAdvances<'a>;

    fn face_count(&self) -> u32 {
        self.face_count
    }

    fn family_name(&self) -> String {
        self.name(StringId::FAMILY_NAME)
    }

    fn style_name(&self) -> String {
        self.name(StringId::SUBFAMILY_NAME)
    }

    fn postscript_name(&self) -> String {
        self.name(StringId::POSTSCRIPT_NAME)
    }

    fn driver_name(&self) -> &str {
        match self.font() {
            Ok(font) if font.table_data(Tag::new(b"glyf")).is_some() => "truetype",
            _ => "cff",
        }
    }

    fn is_sfnt(&self) -> bool {
        true
    }

    fn glyph_count(&self) -> u32 {
        self.font()
            .and_then(|font| font.maxp())
            .map(|maxp| maxp.num_glyphs() as u32)
            .unwrap_or_default()
    }

    fn axes(&self) -> Option<Vec<Axis>> {
        let font = self.font().ok()?;
        let axes = font.axes();
        if axes.is_empty() {
            return None;
        }
        let axes = axes
            .iter()
            .map(|axis| {
                let name = font
                    .localized_strings(axis.name_id())
                    .english_or_first()
                    .map(|name| name.to_string())
                    .unwrap_or_else(|| axis.tag().to_string());
                Axis::new(
                    axis.tag(),
                    name,
                    axis.min_value() as f64,
                    axis.default_value() as f64,
                    axis.max_value() as f64,
                )
                .with_hidden(axis.is_hidden())
            })
            .collect();
        Some(axes)
    }

    fn named_instance_count(&self) -> u32 {
        self.font()
            .map(|font| font.named_instances().len() as u32)
            .unwrap_or_default()
    }

    fn default_named_instance(&self) -> u32 {
        let Ok(font) = self.font() else {
            return 0;
        };
        let defaults: Vec<f32> = font.axes().iter().map(|axis| axis.default_value()).collect();
        font.named_instances()
            .iter()
            .position(|instance| instance.user_coords().eq(defaults.iter().copied()))
            .map_or(0, |position| position as u32 + 1)
    }

    fn select_named_instance(&mut self, index: u32) -> Result<Vec<Fixed>> {
        let font = self.font().map_err(parse_error)?;
        let instances = font.named_instances();
        let count = instances.len() as u32;
        let coords: Vec<Fixed> = index
            .checked_sub(1)
            .and_then(|i| instances.get(i as usize))
            .ok_or(FontError::NamedInstance { index, count })?
            .user_coords()
            .map(|value| Fixed::from_f64(value as f64))
            .collect();
        self.set_variation_coordinates(&coords)?;
        Ok(coords)
    }

    fn variation_coordinates(&self) -> Vec<Fixed> {
        self.user_coords.clone()
    }

    fn set_variation_coordinates(&mut self, coords: &[Fixed]) -> Result<()> {
        let font = self.font().map_err(parse_error)?;
        let Ok(fvar) = font.fvar() else {
            if !coords.is_empty() {
                return Err(FontError::CoordinateCount { expected: 0, actual: coords.len() });
            }
            return Ok(());
        };
        let records = fvar.axes().map_err(parse_error)?;
        if coords.len() > records.len() {
            return Err(FontError::CoordinateCount {
                expected: records.len(),
                actual: coords.len(),
            });
        }

        let avar_mappings = font.avar().ok().map(|avar| avar.axis_segment_maps());
        let mut user_coords = Vec::with_capacity(records.len());
        let mut location = Vec::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            // trailing axes stay at their defaults
            let value = coords.get(i).copied().unwrap_or_else(|| record.default_value());
            let coord = record.normalize(value);
            let coord = avar_mappings
                .as_ref()
                .and_then(|mappings| mappings.get(i).transpose().ok())
                .flatten()
                .map(|mapping| mapping.apply(coord))
                .unwrap_or(coord);
            user_coords.push(value);
            location.push(coord.to_f2dot14());
        }
        self.user_coords = user_coords;
        self.location = location;
        Ok(())
    }

    fn set_char_size(&mut self, point_size: u32, dpi: u32) -> Result<()> {
        if point_size == 0 || dpi == 0 {
            return Err(FontError::InvalidSize(point_size));
        }
        self.ppem = (point_size as f32 * dpi as f32 / 72.0).round();
        Ok(())
    }

    fn size_metrics(&self) -> SizeMetrics {
        let Ok(font) = self.font() else {
            return SizeMetrics::default();
        };
        let ppem = self.ppem as i32;
        let metrics = font.metrics(Size::new(self.ppem), LocationRef::new(&self.location));
        let height = (metrics.ascent - metrics.descent + metrics.leading).ceil() as i32;
        let line_height = if height > 0 { height } else { ppem };
        SizeMetrics { x_ppem: ppem, y_ppem: ppem, line_height }
    }

    fn set_hinting(&mut self, hinting: bool) {
        self.hinting = hinting;
    }

    fn advances(&self) -> SkrifaAdvances<'_> {
        let font = self.font().ok();
        let location = LocationRef::new(&self.location);
        SkrifaAdvances {
            metrics: font.as_ref().map(|font| font.glyph_metrics(Size::new(self.ppem), location)),
            charmap: font.as_ref().map(|font| font.charmap()),
            hinted: self.hinting,
        }
    }
}

/// Scaled advances for one frame.
pub struct SkrifaAdvances<'a> {
    metrics: Option<GlyphMetrics<'a>>,
    charmap: Option<Charmap<'a>>,
    hinted: bool,
}

impl AdvanceProvider for SkrifaAdvances<'_> {
    fn advance(&self, glyph: GlyphRef) -> Option<f32> {
        let metrics = self.metrics.as_ref()?;
        let gid = match glyph {
            GlyphRef::Index(gid) => GlyphId::new(gid),
            // unmapped characters render as .notdef
            GlyphRef::Char(ch) => self.charmap.as_ref()?.map(ch).unwrap_or(GlyphId::NOTDEF),
        };
        let advance = metrics.advance_width(gid)?;
        Some(if self.hinted { advance.round() } else { advance })
    }
}

#[cfg(test)]
mod tests {
    use font_test_data::{CANTARELL_VF_TRIMMED, SIMPLE_GLYF, VAZIRMATN_VAR};

    use super::*;

    fn vazirmatn() -> SkrifaFace {
        SkrifaFace::from_data(VAZIRMATN_VAR.to_vec(), 0).unwrap()
    }

    #[test]
    fn reads_axes() {
        let axes = vazirmatn().axes().unwrap();
        assert_eq!(axes.len(), 1);
        assert_eq!(axes[0].tag, Tag::new(b"wght"));
        assert_eq!(axes[0].name, "Weight");
        assert_eq!(axes[0].minimum, Fixed::from_f64(100.0));
        assert_eq!(axes[0].default, Fixed::from_f64(400.0));
        assert_eq!(axes[0].maximum, Fixed::from_f64(900.0));
        assert!(!axes[0].hidden);
    }

    #[test]
    fn starts_at_default_coordinates() {
        let face = vazirmatn();
        assert_eq!(face.variation_coordinates(), [Fixed::from_f64(400.0)]);
        assert_eq!(face.location(), [F2Dot14::from_f32(0.0)]);
    }

    #[test]
    fn applies_avar_mapping() {
        let mut face = vazirmatn();
        face.set_variation_coordinates(&[Fixed::from_f64(700.0)]).unwrap();

        let font = FontRef::new(VAZIRMATN_VAR).unwrap();
        let expected = font.axes().location([("wght", 700.0)]);
        assert_eq!(face.location(), expected.coords());
        assert_eq!(face.location(), [F2Dot14::from_f32(0.6776123)]);
    }

    #[test]
    fn rejects_extra_coordinates() {
        let mut face = vazirmatn();
        let result = face.set_variation_coordinates(&[Fixed::from_f64(400.0); 2]);
        assert!(matches!(result, Err(FontError::CoordinateCount { expected: 1, actual: 2 })));
    }

    #[test]
    fn named_instances() {
        let mut face = vazirmatn();
        assert!(face.named_instance_count() >= 7);
        // Regular is the fourth instance
        assert_eq!(face.default_named_instance(), 4);

        let coords = face.select_named_instance(1).unwrap();
        assert_eq!(coords, [Fixed::from_f64(100.0)]);
        assert_eq!(face.location(), [F2Dot14::from_f32(-1.0)]);

        let count = face.named_instance_count();
        assert!(matches!(
            face.select_named_instance(0),
            Err(FontError::NamedInstance { index: 0, .. })
        ));
        assert!(face.select_named_instance(count + 1).is_err());
    }

    #[test]
    fn advances_follow_size_and_coordinates() {
        let mut face = vazirmatn();
        face.set_hinting(false);
        // 2048 ppem is one pixel per font unit
        face.set_char_size(2048, 72).unwrap();
        assert_eq!(face.advances().advance(GlyphRef::Index(1)), Some(1336.0));
        assert_eq!(face.advances().advance(GlyphRef::Index(4)), None);

        face.set_variation_coordinates(&[Fixed::from_f64(100.0)]).unwrap();
        let thin = face.advances().advance(GlyphRef::Index(1)).unwrap();
        assert!(thin < 1336.0);
    }

    #[test]
    fn hinting_rounds_advances() {
        let mut face = vazirmatn();
        face.set_char_size(13, 72).unwrap();
        face.set_hinting(true);
        let advance = face.advances().advance(GlyphRef::Index(1)).unwrap();
        assert_eq!(advance, advance.round());
    }

    #[test]
    fn size_metrics() {
        let mut face = vazirmatn();
        face.set_char_size(2048, 72).unwrap();
        let metrics = face.size_metrics();
        assert_eq!(metrics.x_ppem, 2048);
        assert_eq!(metrics.y_ppem, 2048);
        assert_eq!(metrics.line_height, 3200);

        face.set_char_size(32, 144).unwrap();
        assert_eq!(face.size_metrics().y_ppem, 64);
        assert!(matches!(face.set_char_size(0, 72), Err(FontError::InvalidSize(0))));
    }

    #[test]
    fn static_font_has_no_axes() {
        let face = SkrifaFace::from_data(SIMPLE_GLYF.to_vec(), 0).unwrap();
        assert!(face.axes().is_none());
        assert_eq!(face.glyph_count(), 3);
        assert_eq!(face.driver_name(), "truetype");
        assert!(face.variation_coordinates().is_empty());
    }

    #[test]
    fn cff_driver() {
        let face = SkrifaFace::from_data(CANTARELL_VF_TRIMMED.to_vec(), 0).unwrap();
        assert_eq!(face.driver_name(), "cff");
    }

    #[test]
    fn face_index_out_of_range() {
        let result = SkrifaFace::from_data(VAZIRMATN_VAR.to_vec(), 1);
        assert!(matches!(result, Err(FontError::FaceIndex { index: 1, count: 1 })));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let result = SkrifaFace::from_data(b"not a font".to_vec(), 0);
        assert!(matches!(result, Err(FontError::Parse(_))));
    }
}
