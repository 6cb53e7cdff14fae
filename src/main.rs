// SPDX-License-Identifier: MPL-2.0
use iced_folio::app::{self, paths, Flags};

const HELP: &str = "\
iced_folio - interactive portfolio

USAGE:
  iced_folio [OPTIONS]

OPTIONS:
  --lang <LOCALE>       Interface language (e.g. en-US, fr)
  --content <FILE>      Content document replacing the embedded one
  --config-dir <DIR>    Directory holding settings.toml
  --data-dir <DIR>      Directory holding the persisted state
  -h, --help            Print this help
";

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let flags = Flags {
        lang: opt_string(&mut args, "--lang"),
        content_path: opt_string(&mut args, "--content"),
        config_dir: opt_string(&mut args, "--config-dir"),
        data_dir: opt_string(&mut args, "--data-dir"),
    };

    let rest = args.finish();
    if !rest.is_empty() {
        log::warn!("Ignoring unexpected arguments: {rest:?}");
    }

    paths::init_cli_overrides(flags.data_dir.clone(), flags.config_dir.clone());
    app::run(flags)
}

/// Reads an optional string flag; a malformed value is logged and ignored.
fn opt_string(args: &mut pico_args::Arguments, key: &'static str) -> Option<String> {
    match args.opt_value_from_str(key) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("Ignoring {key}: {err}");
            None
        }
    }
}
