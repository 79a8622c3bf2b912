pub mod cli;
pub mod surface;

use std::io;

use anyhow::{Context, Result};
use vfview_core::ViewerSession;
use vfview_font_engine::SkrifaEngine;

use crate::{cli::Cli, surface::TerminalSurface};

/// Run a viewer session on stdin/stdout; returns the glyph failure count.
pub fn run(cli: Cli) -> Result<u64> {
    let config = cli.into_config()?;
    let (stdin, stdout) = (io::stdin().lock(), io::stdout().lock());
    let mut surface = TerminalSurface::new(stdin, stdout, config.width, config.height)
        .context("failed to open display surface")?;
    let mut session = ViewerSession::new(SkrifaEngine::new(), config);
    session.run(&mut surface).context("display surface failed")
}
