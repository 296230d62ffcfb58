//! Error types for the evaluation tooling.
#![allow(missing_docs)]

/// Creates the Error, ErrorKind, ResultExt, and Result types
error_chain!{
    errors {
        NoTrials(prefix: String) {
            description("no trial file found")
            display("no trial file found for '{}'", prefix)
        }
        EmptyTrial(path: String) {
            description("trial file has no processing element")
            display("trial file '{}' has no processing element", path)
        }
        NegativeTime(path: String, row: usize) {
            description("negative or non-finite time in trial file")
            display("negative or non-finite time in '{}' at row {}", path, row)
        }
        InvalidSetting(reason: String) {
            description("invalid report setting")
            display("invalid report setting: {}", reason)
        }
        UnknownMetric(name: String) {
            description("unknown metric")
            display("unknown metric '{}'", name)
        }
    }

    foreign_links {
        Io(::std::io::Error);
        Csv(::csv::Error);
        Toml(::toml::de::Error);
    }
}
