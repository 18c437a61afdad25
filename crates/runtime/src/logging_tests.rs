use super::*;
use log::{Level, LevelFilter};
use serial_test::serial;

#[test]
#[serial]
fn level_from_env_parses_cases() {
    let cases: &[(Option<&str>, LevelFilter)] = &[
        (None, LevelFilter::Warn),
        (Some("error"), LevelFilter::Error),
        (Some("ERROR"), LevelFilter::Error),
        (Some("warn"), LevelFilter::Warn),
        (Some("info"), LevelFilter::Info),
        (Some("INFO"), LevelFilter::Info),
        (Some("debug"), LevelFilter::Debug),
        (Some("trace"), LevelFilter::Trace),
        (Some("off"), LevelFilter::Off),
        (Some("garbage"), LevelFilter::Warn),
        (Some(""), LevelFilter::Warn),
    ];

    for (value, expected) in cases {
        match value {
            Some(v) => unsafe { std::env::set_var(PROGRAM_LOG_LEVEL, v) },
            None => unsafe { std::env::remove_var(PROGRAM_LOG_LEVEL) },
        }

        let got = level_from_env();
        assert_eq!(
            got, *expected,
            "env {:?} should yield {:?}, got {:?}",
            value, expected, got
        );
    }

    unsafe { std::env::remove_var(PROGRAM_LOG_LEVEL) };
}

#[test]
fn enabled_respects_level_threshold() {
    let filters = [
        LevelFilter::Off,
        LevelFilter::Error,
        LevelFilter::Warn,
        LevelFilter::Info,
        LevelFilter::Debug,
        LevelFilter::Trace,
    ];
    let levels = [
        Level::Error,
        Level::Warn,
        Level::Info,
        Level::Debug,
        Level::Trace,
    ];

    for max in filters {
        let logger = StderrLogger { max };

        for level in levels {
            let meta = Metadata::builder().level(level).target("t").build();

            let expected = level <= max;
            assert_eq!(
                logger.enabled(&meta),
                expected,
                "filter {:?}, record level {:?}",
                max,
                level
            );
        }
    }
}

#[test]
fn stderr_logger_does_not_panic() {
    let logger = StderrLogger {
        max: LevelFilter::Info,
    };

    let cases = [
        (Level::Debug, "debug message"),
        (Level::Info, "info message"),
        (Level::Error, "error message"),
    ];

    for (level, msg) in &cases {
        let args = format_args!("{msg}");
        let record = Record::builder()
            .level(*level)
            .target("t")
            .args(args)
            .build();
        logger.log(&record);
    }

    logger.flush();
}
