mod config;
mod render;
mod session;
mod skip;
mod timer;

use anyhow::Context;
use std::io::{self, Write};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use config::Settings;
use render::Renderer;
use skip::SkipToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout belongs to the countdown, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("POMODORO_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let resolved = Settings::resolve(std::env::args().skip(1))?;
    let settings = resolved.settings;

    debug!(
        "Resolved settings: {settings:?} ({} unknown option(s) ignored)",
        resolved.ignored.len()
    );

    let skip = SkipToken::new();
    let mut renderer = Renderer::stdout();
    launch(&settings, &skip, &mut io::stdout(), &mut renderer).await
}

/// Print usage if help was requested, otherwise run the cycle until output fails.
async fn launch<H: Write, W: Write>(
    settings: &Settings,
    skip: &SkipToken,
    help: &mut H,
    renderer: &mut Renderer<W>,
) -> anyhow::Result<()> {
    if settings.help_requested {
        help.write_all(config::usage().as_bytes())?;
        help.flush()?;
        return Ok(());
    }

    skip.listen().context("failed to install skip signal handler")?;
    session::run(settings, skip, renderer)
        .await
        .context("failed to write countdown")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Style;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn help_prints_usage_without_counting_down() {
        let settings = Settings::resolve(["--help", "-w", "1"]).unwrap().settings;
        let skip = SkipToken::new();
        let mut help: Vec<u8> = Vec::new();
        let mut renderer = Renderer::new(Vec::new(), Style::Lines);

        tokio::time::timeout(
            Duration::from_secs(5),
            launch(&settings, &skip, &mut help, &mut renderer),
        )
        .await
        .expect("help should return without starting a countdown")
        .unwrap();

        assert_eq!(String::from_utf8(help).unwrap(), config::usage());
        assert!(renderer.into_inner().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn without_help_the_countdown_starts() {
        let settings = Settings::resolve(["-w", "1"]).unwrap().settings;
        let skip = SkipToken::new();
        let mut help: Vec<u8> = Vec::new();
        let mut renderer = Renderer::new(Vec::new(), Style::Lines);

        let finished = tokio::time::timeout(
            Duration::from_millis(1500),
            launch(&settings, &skip, &mut help, &mut renderer),
        )
        .await;

        assert!(finished.is_err());
        assert!(help.is_empty());
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(out, "work\t01:00\nwork\t00:59\n");
    }
}
