use chrono::Local;
use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;

pub fn init(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };

    Builder::new()
        .format(|buf, record| {
            writeln!(buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, level)
        // Keep reqwest/hyper chatter out of verbose output.
        .filter(Some("reqwest"), LevelFilter::Info)
        .filter(Some("hyper_util"), LevelFilter::Info)
        .init();

    log::debug!("Logger initialized at {}.", level);
}
