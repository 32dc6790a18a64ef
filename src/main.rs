// SPDX-License-Identifier: MPL-2.0
//! Command-line front end: resolves a video's stream variants and prints the
//! manifest URL the player would attach.

use std::process::ExitCode;
use std::sync::Arc;

use stream_player::app::paths;
use stream_player::config;
use stream_player::error::Error;
use stream_player::i18n::I18n;
use stream_player::stream::{HttpStreamApi, StreamResolver, VideoId};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "stream_player=info";

struct Flags {
    video_id: Option<String>,
    token: Option<String>,
    api: Option<String>,
    quality: Option<String>,
    lang: Option<String>,
    config_dir: Option<String>,
    refresh: bool,
}

fn parse_flags() -> Result<Flags, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    let flags = Flags {
        refresh: args.contains("--refresh"),
        video_id: args.opt_value_from_str("--video-id")?,
        token: args.opt_value_from_str("--token")?,
        api: args.opt_value_from_str("--api")?,
        quality: args.opt_value_from_str("--quality")?,
        lang: args.opt_value_from_str("--lang")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
    };
    let rest = args.finish();
    if !rest.is_empty() {
        tracing::warn!(?rest, "ignoring unexpected arguments");
    }
    Ok(flags)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    let flags = match parse_flags() {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    paths::init_cli_overrides(flags.config_dir.clone());
    let (config, warning) = config::load();
    let i18n = I18n::new(flags.lang.clone(), &config);
    if let Some(key) = warning {
        eprintln!("{}", i18n.tr(&key));
    }

    let (Some(video_id), Some(token)) = (flags.video_id.clone(), flags.token.clone()) else {
        let name = if flags.video_id.is_none() { "--video-id" } else { "--token" };
        eprintln!("{}", i18n.tr_with_args("cli-missing-argument", &[("name", name)]));
        return ExitCode::FAILURE;
    };

    let base_url = flags
        .api
        .clone()
        .unwrap_or_else(|| config.player.api_base_url.clone());
    let preferred = flags
        .quality
        .clone()
        .unwrap_or_else(|| config.player.default_quality.clone());

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(err) => {
            tracing::error!(%err, "failed to start async runtime");
            return ExitCode::FAILURE;
        }
    };

    let outcome = runtime.block_on(run(
        &base_url,
        VideoId::new(video_id),
        token,
        &preferred,
        flags.refresh,
    ));

    match outcome {
        Ok((quality, url, qualities)) => {
            println!(
                "{}",
                i18n.tr_with_args("cli-stream-selected", &[("quality", quality.as_str()), ("url", url.as_str())])
            );
            println!(
                "{}",
                i18n.tr_with_args("cli-qualities", &[("qualities", qualities.as_str())])
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::debug!(error = %err, "resolution failed");
            eprintln!("{}", i18n.tr(err.i18n_key()));
            ExitCode::FAILURE
        }
    }
}

async fn run(
    base_url: &str,
    video_id: VideoId,
    mut token: String,
    preferred: &str,
    refresh: bool,
) -> Result<(String, String, String), Error> {
    let api = HttpStreamApi::new(base_url)?;
    let resolver = StreamResolver::new(Arc::new(api));

    if refresh {
        token = resolver.refresh_token(&video_id, &token).await?;
    }

    let resolution = resolver.resolve(&video_id, &token).await?;
    let quality = resolution
        .variants
        .choose_quality(preferred)
        .ok_or_else(|| Error::network("no stream variants"))?;
    let url = resolution
        .variants
        .url_for(&quality)
        .ok_or_else(|| Error::network("no stream variants"))?
        .to_string();
    let qualities = resolution.qualities().join(", ");
    Ok((quality, url, qualities))
}
