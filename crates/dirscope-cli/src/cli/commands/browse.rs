//! Interactive browse command.

use std::path::Path;

use anyhow::{Context, Result};
use dirscope_core::config::Config;
use dirscope_core::scan;
use dirscope_tui::{BrowserOptions, Outcome};

use crate::cli::{BrowseArgs, Cancelled};

pub fn run(args: &BrowseArgs) -> Result<()> {
    let config = Config::load().context("load config")?;
    let options = options_from(&config, args);

    let start = args.path.as_deref().unwrap_or_else(|| Path::new("."));
    let start_dir = scan::resolve_start_dir(start)?;

    match dirscope_tui::run_browser(options, start_dir)? {
        Outcome::Chosen(dir) => {
            tracing::info!(dir = %dir.display(), "directory chosen");
            println!("{}", dir.display());
            Ok(())
        }
        Outcome::Cancelled => {
            tracing::info!("browse cancelled");
            Err(Cancelled.into())
        }
    }
}

/// Config values with command-line flags applied on top.
fn options_from(config: &Config, args: &BrowseArgs) -> BrowserOptions {
    let mut options = BrowserOptions::from(config);
    if args.hidden {
        options.show_hidden = true;
    }
    if let Some(wrap) = args.wrap {
        options.wrap = wrap;
    }
    options
}

#[cfg(test)]
mod tests {
    use dirscope_core::WrapPolicy;

    use super::*;

    #[test]
    fn test_flags_override_config() {
        let config = Config {
            show_hidden: false,
            wrap: WrapPolicy::Word,
            list_width_percent: 95,
        };
        let args = BrowseArgs {
            hidden: true,
            wrap: Some(WrapPolicy::None),
            ..BrowseArgs::default()
        };

        let options = options_from(&config, &args);
        assert!(options.show_hidden);
        assert_eq!(options.wrap, WrapPolicy::None);
        assert_eq!(options.list_width_percent, 80);
    }

    #[test]
    fn test_config_used_without_flags() {
        let config = Config {
            show_hidden: true,
            wrap: WrapPolicy::Character,
            ..Config::default()
        };

        let options = options_from(&config, &BrowseArgs::default());
        assert!(options.show_hidden);
        assert_eq!(options.wrap, WrapPolicy::Character);
    }
}
