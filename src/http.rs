use std::error::Error;
use std::fmt::{Display, Error as FmtError, Formatter};

use log::debug;
use reqwest::blocking::Client;

/// The feed endpoint blocks unknown clients, so every request carries a browser UA.
pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:99.0) Gecko/20100101 Firefox/99.0";

#[derive(Debug)]
pub enum FetchError {
    /// The server answered with a non-success status.
    Status(u16),
    Transport(Box<dyn Error + Send + Sync>),
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), FmtError> {
        match *self {
            FetchError::Status(code) => write!(f, "server responded with HTTP {}", code),
            FetchError::Transport(ref err) => write!(f, "{}", err),
        }
    }
}

impl Error for FetchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            FetchError::Status(_) => None,
            FetchError::Transport(ref err) => Some(err.as_ref()),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(Box::new(err))
    }
}

/// A single blocking GET returning the whole body.
pub trait Fetch {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Result<HttpClient, reqwest::Error> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(HttpClient { client })
    }
}

impl Fetch for HttpClient {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(response.bytes()?.to_vec())
    }
}
