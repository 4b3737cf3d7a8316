use crate::errors::{FinderError, FinderResult};
use crate::models::center::Center;

/// Views the finder moves between.
///
/// `Booking` carries the chosen center by value; the booking view never
/// looks it up again.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Home,
    Search { state: String, city: String },
    Booking { center: Center },
    MyBookings,
}

impl Route {
    pub fn search(state: impl Into<String>, city: impl Into<String>) -> Self {
        Route::Search {
            state: state.into(),
            city: city.into(),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Search { state, city } => format!(
                "/search?state={}&city={}",
                urlencoding::encode(state),
                urlencoding::encode(city)
            ),
            Route::Booking { .. } => "/booking".to_string(),
            Route::MyBookings => "/my-bookings".to_string(),
        }
    }

    /// Decode a `state=..&city=..` query (with or without the leading `?`)
    /// into a search route. Both parameters are required.
    pub fn parse_search(query: &str) -> FinderResult<Self> {
        let mut state = None;
        let mut city = None;

        for pair in query.trim_start_matches('?').split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            let value = urlencoding::decode(value)
                .map_err(|e| FinderError::Validation(format!("Invalid query value: {}", e)))?
                .into_owned();
            match key {
                "state" => state = Some(value),
                "city" => city = Some(value),
                _ => {}
            }
        }

        match (state, city) {
            (Some(state), Some(city)) if !state.is_empty() && !city.is_empty() => {
                Ok(Route::Search { state, city })
            }
            _ => Err(FinderError::Validation(
                "Search requires both state and city".into(),
            )),
        }
    }
}
