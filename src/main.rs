// SPDX-License-Identifier: MPL-2.0
use photo_viewer::app::{self, Flags};
use photo_viewer::config::Overrides;
use photo_viewer::logging;
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "\
Usage: photo-viewer [OPTIONS] [PATH]

Arguments:
  [PATH]                Image file or directory (same as -i)

Options:
  -i <PATH>             Image file or directory to open
  -r <DIR>              Directory holding the raw siblings
  -t <DIR>              Directory deleted images are moved to
  -e <EXT>              Raw file extension, e.g. .ARW
  -h, --help            Print this help
";

fn parse_args() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let mut overrides = Overrides {
        image_path: args.opt_value_from_str::<_, PathBuf>("-i")?,
        raw_image_dir: args.opt_value_from_str("-r")?,
        trash_dir: args.opt_value_from_str("-t")?,
        raw_extension: args.opt_value_from_str("-e")?,
    };

    let mut rest = args.finish().into_iter();
    if let Some(flag) = rest.clone().find(|arg| arg.to_string_lossy().starts_with('-')) {
        return Err(pico_args::Error::ArgumentParsingFailed {
            cause: format!("unknown option {}", flag.to_string_lossy()),
        });
    }
    if let Some(positional) = rest.next() {
        overrides.image_path.get_or_insert_with(|| PathBuf::from(positional));
    }
    if let Some(extra) = rest.next() {
        return Err(pico_args::Error::ArgumentParsingFailed {
            cause: format!("unexpected argument {}", extra.to_string_lossy()),
        });
    }

    Ok(Some(Flags { overrides }))
}

fn main() -> ExitCode {
    let flags = match parse_args() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("Error: {err}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    logging::init();

    match app::run(flags) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
