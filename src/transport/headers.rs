/******************************************************************************
    Author: Joaquín Béjar García
    Email: jb@taunais.com
    Date: 19/10/26
 ******************************************************************************/

use std::collections::HashMap;
use tracing::debug;

const MOBILE_USER_AGENT: &str = "Mozilla/5.0 (Linux; U; Android 4.1.2; ko-kr; SHV-E250S Build/JZO54K) AppleWebKit/534.30 (KHTML, like Gecko) Version/4.0 Mobile Safari/534.30";
const APP_USER_AGENT: &str = "dcinside.app";
const DESKTOP_USER_AGENT: &str = "Mozilla/5.0";

/// The header sets the remote side expects from its different clients.
///
/// `Host` is left to the http client, it is derived from the request url.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderProfile {
    /// Mobile web pages, used by the write and delete flows.
    Mobile,
    /// The official app, used by the json apis.
    App,
    /// The desktop member pages (login, logout).
    Desktop,
}

impl HeaderProfile {
    /// Builds the headers of the profile.
    ///
    /// # Returns
    ///
    /// A `HashMap` with at least `User-Agent` and `Referer`. The mobile profile
    /// also marks requests as `XMLHttpRequest`, which the mobile endpoints
    /// check before answering with a script fragment.
    pub fn headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        match self {
            HeaderProfile::Mobile => {
                headers.insert("User-Agent".to_string(), MOBILE_USER_AGENT.to_string());
                headers.insert("Referer".to_string(), "http://m.dcinside.com".to_string());
                headers.insert("X-Requested-With".to_string(), "XMLHttpRequest".to_string());
            }
            HeaderProfile::App => {
                headers.insert("User-Agent".to_string(), APP_USER_AGENT.to_string());
                headers.insert("Referer".to_string(), "http://m.dcinside.com".to_string());
            }
            HeaderProfile::Desktop => {
                headers.insert("User-Agent".to_string(), DESKTOP_USER_AGENT.to_string());
                headers.insert("Referer".to_string(), "http://www.dcinside.com".to_string());
            }
        }
        debug!("Headers {:?}: {:?}", self, headers);
        headers
    }
}
