use std::ffi::OsString;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// URL to prefill the request draft with
    #[arg(help = "URL to prefill the request with")]
    url: Option<String>,

    #[arg(short = 'X', long, help = "HTTP method to prefill (GET, POST, ...)")]
    method: Option<String>,

    #[arg(
        short = 'H',
        long,
        help = "request headers as a JSON object, e.g. '{\"Accept\":\"application/json\"}'"
    )]
    headers: Option<String>,

    #[arg(short = 'd', long, help = "request body (JSON)")]
    body: Option<String>,

    #[arg(long, help = "directory holding history, theme and exports")]
    config_dir: Option<String>,

    #[arg(long, help = "log level (trace, debug, info, warn, error)")]
    log_level: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CommandLineArgs {
    url: Option<String>,
    method: Option<String>,
    headers: Option<String>,
    body: Option<String>,
    config_dir: Option<String>,
    log_level: Option<String>,
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    pub fn headers(&self) -> Option<&str> {
        self.headers.as_deref()
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn config_dir(&self) -> Option<&str> {
        self.config_dir.as_deref()
    }

    pub fn log_level(&self) -> Option<&str> {
        self.log_level.as_deref()
    }
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            url: args.url,
            method: args.method,
            headers: args.headers,
            body: args.body,
            config_dir: args.config_dir,
            log_level: args.log_level,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_args_url_and_method() {
        let args = CommandLineArgs::parse_from(["postboy", "-X", "post", "https://example.com"]);
        assert_eq!(args.url(), Some("https://example.com"));
        assert_eq!(args.method(), Some("post"));
    }

    #[test]
    fn test_parse_args_headers_and_body() {
        let args = CommandLineArgs::parse_from([
            "postboy",
            "-H",
            "{\"Accept\":\"text/plain\"}",
            "--body",
            "{\"a\":1}",
        ]);
        assert_eq!(args.headers(), Some("{\"Accept\":\"text/plain\"}"));
        assert_eq!(args.body(), Some("{\"a\":1}"));
    }

    #[test]
    fn test_default_values() {
        let args = CommandLineArgs::parse_from(["postboy"]);
        assert_eq!(args.url(), None);
        assert_eq!(args.config_dir(), None);
        assert_eq!(args.log_level(), None);
    }

    #[test]
    fn test_parse_config_dir_and_log_level() {
        let args = CommandLineArgs::parse_from([
            "postboy",
            "--config-dir",
            "/tmp/pb",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.config_dir(), Some("/tmp/pb"));
        assert_eq!(args.log_level(), Some("debug"));
    }
}
