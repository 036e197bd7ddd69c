//! OAuth redirect parsing. The app-scheme callback URI carries the tokens in
//! its fragment (or, for some providers, its query string).

/// Tokens extracted from an OAuth redirect URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Pull `access_token` and `refresh_token` out of a redirect URI, preferring
/// the fragment over the query string. Returns `None` unless both tokens are
/// present; a callback without them is a failed sign-in attempt.
pub fn extract_callback_tokens(url: &str) -> Option<CallbackTokens> {
    let params = url
        .split_once('#')
        .map(|(_, fragment)| fragment)
        .or_else(|| url.split_once('?').map(|(_, query)| query))?;

    let mut access_token = None;
    let mut refresh_token = None;
    for pair in params.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        match key {
            "access_token" if !value.is_empty() => access_token = Some(value.to_string()),
            "refresh_token" if !value.is_empty() => refresh_token = Some(value.to_string()),
            _ => {}
        }
    }

    Some(CallbackTokens {
        access_token: access_token?,
        refresh_token: refresh_token?,
    })
}
