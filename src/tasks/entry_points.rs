/* ********************************************************************** **
**  This file is part of bridgecv.                                        **
**                                                                        **
**  bridgecv is free software: you can redistribute it and/or modify it   **
**  under the terms of the GNU General Public License as published by the **
**  Free Software Foundation, either version 3 of the License, or (at     **
**  your option) any later version.                                       **
**                                                                        **
**      http://www.gnu.org/licenses/                                      **
**                                                                        **
** Do note that, while the whole of bridgecv is licensed under the GPL,   **
** many parts of it are licensed under more permissive terms.             **
** ********************************************************************** */

use crate::{Driver, FailResult, GlobalLogger, XyzReader};
use bridgecv_tasks_config::{ValidatedSettings, YamlRead};

use clap::{App, Arg, ArgMatches};
use failure::ResultExt;
use log::LevelFilter;
use std::ffi::OsStr;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter};

fn wrap_result_main<F>(main: F)
where F: FnOnce() -> FailResult<()>,
{
    main().unwrap_or_else(|e| {
        // the error may have come from setting up the logger
        let report = |msg: &dyn fmt::Display| match log::max_level() {
            LevelFilter::Off => eprintln!("Error: {}", msg),
            _ => error!("{}", msg),
        };
        for cause in e.iter_chain() {
            report(&cause);
        }

        if std::env::var_os("RUST_BACKTRACE") == Some(OsStr::new("1").to_owned()) {
            report(e.backtrace());
        }
        std::process::exit(1);
    });
}

fn read_settings(path: &str) -> FailResult<ValidatedSettings> {
    let file = File::open(path).with_context(|_| format!("could not open config '{}'", path))?;
    let settings = ValidatedSettings::from_reader(file)
        .with_context(|_| format!("while reading config '{}'", path))?;
    Ok(settings)
}

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("bridgecv")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Evaluates bridging collective variables over each frame of a trajectory.")
        .args(&[
            Arg::with_name("config")
                .short("c").long("config").value_name("CONFIG")
                .takes_value(true).required(true)
                .help("config yaml describing the colvars"),
            Arg::with_name("trajectory")
                .value_name("TRAJECTORY")
                .required(true)
                .help("multi-frame xyz file; frame n is step n. A Lattice=\"...\" entry (3 or 9 numbers) in a comment line sets that frame's cell"),
            Arg::with_name("output")
                .short("o").long("output").value_name("COLVAR")
                .takes_value(true)
                .help("where to write the table of values [default: stdout]"),
            Arg::with_name("log")
                .long("log").value_name("FILE")
                .takes_value(true)
                .help("also write log messages to this file"),
            Arg::with_name("verbose")
                .short("v").long("verbose")
                .multiple(true)
                .help("log more (can be given twice)"),
        ])
}

fn run(matches: &ArgMatches) -> FailResult<()> {
    let config = matches.value_of("config").ok_or_else(|| format_err!("missing --config"))?;
    let trajectory = matches.value_of("trajectory").ok_or_else(|| format_err!("missing trajectory"))?;

    let settings = read_settings(config)?;
    let mut driver = Driver::from_settings(&settings)?;
    let frames = XyzReader::open(trajectory)?;

    let num_frames = match matches.value_of("output") {
        Some(path) => {
            let file = File::create(path).with_context(|_| format!("could not create '{}'", path))?;
            driver.run(frames, BufWriter::new(file))?
        },
        None => {
            let stdout = io::stdout();
            let lock = stdout.lock();
            driver.run(frames, lock)?
        },
    };
    info!("Processed {} frames", num_frames);
    Ok(())
}

/// Entry point of the `bridgecv` binary.
pub fn bridgecv() {
    wrap_result_main(|| {
        let matches = app().get_matches();

        let mut logger = GlobalLogger::default();
        logger.verbosity(matches.occurrences_of("verbose") as i32);
        if let Some(path) = matches.value_of("log") {
            logger.path(path);
        }
        logger.apply()?;

        run(&matches)
    });
}
