use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

use crate::{Res, config::APP_NAME};

/// Routes `log` records to stderr.
///
/// monthlify's own records are shown at `info`, or `debug` when `verbose`;
/// HTTP internals only from `warn` up.
pub fn init_logging(verbose: bool) -> Res<()> {
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Blue)
        .debug(Color::BrightBlack);

    let own_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} {}: {}",
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(LevelFilter::Warn)
        .level_for(APP_NAME, own_level)
        .chain(std::io::stderr())
        .apply()?;

    Ok(())
}
