//! # Location Selection
//!
//! State machine behind the search form. A user first picks a state, which
//! triggers a city lookup, then picks a city from the returned list:
//!
//! ```text
//! NoStateSelected --select_state--> StateSelected --select_city--> StateAndCitySelected
//!        ^                               |    ^                            |
//!        +----------clear_state----------+    +-------select_state---------+
//! ```
//!
//! Picking a state always clears the city. City lookups are stamped with a
//! generation number so a slow response for a state the user has already
//! moved away from is dropped instead of overwriting the current list.
//!
//! Only one dropdown is open at a time. A pointer press outside both
//! dropdowns closes whichever is open.

use tracing::debug;

use crate::errors::{FinderError, FinderResult};
use crate::navigation::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    NoStateSelected,
    StateSelected,
    StateAndCitySelected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dropdown {
    State,
    City,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveDropdown {
    #[default]
    None,
    State,
    City,
}

/// Where a pointer-down landed relative to the two dropdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Inside(Dropdown),
    Outside,
}

/// A pending city lookup. Hand it back to [`SelectionState::apply_cities`]
/// together with the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityRequest {
    pub state: String,
    pub generation: u64,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    states: Vec<String>,
    cities: Vec<String>,
    selected_state: Option<String>,
    selected_city: Option<String>,
    active: ActiveDropdown,
    cities_loading: bool,
    generation: u64,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_states(&mut self, states: Vec<String>) {
        self.states = states;
    }

    pub fn states(&self) -> &[String] {
        &self.states
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn selected_state(&self) -> Option<&str> {
        self.selected_state.as_deref()
    }

    pub fn selected_city(&self) -> Option<&str> {
        self.selected_city.as_deref()
    }

    pub fn cities_loading(&self) -> bool {
        self.cities_loading
    }

    pub fn active_dropdown(&self) -> ActiveDropdown {
        self.active
    }

    pub fn is_open(&self, dropdown: Dropdown) -> bool {
        matches!(
            (dropdown, self.active),
            (Dropdown::State, ActiveDropdown::State) | (Dropdown::City, ActiveDropdown::City)
        )
    }

    pub fn phase(&self) -> SelectionPhase {
        match (&self.selected_state, &self.selected_city) {
            (None, _) => SelectionPhase::NoStateSelected,
            (Some(_), None) => SelectionPhase::StateSelected,
            (Some(_), Some(_)) => SelectionPhase::StateAndCitySelected,
        }
    }

    /// The city dropdown accepts input once a state is chosen and its cities have arrived.
    pub fn city_dropdown_enabled(&self) -> bool {
        self.selected_state.is_some() && !self.cities_loading
    }

    pub fn select_state(&mut self, state: &str) -> FinderResult<CityRequest> {
        if !self.states.iter().any(|s| s == state) {
            return Err(FinderError::NotFound(format!("State {}", state)));
        }

        self.generation += 1;
        self.selected_state = Some(state.to_string());
        self.selected_city = None;
        self.cities.clear();
        self.cities_loading = true;
        self.active = ActiveDropdown::None;

        debug!(state, generation = self.generation, "state selected");

        Ok(CityRequest {
            state: state.to_string(),
            generation: self.generation,
        })
    }

    /// Return to `NoStateSelected`. Any city lookup still in flight becomes stale.
    pub fn clear_state(&mut self) {
        self.generation += 1;
        self.selected_state = None;
        self.selected_city = None;
        self.cities.clear();
        self.cities_loading = false;
        if self.active == ActiveDropdown::City {
            self.active = ActiveDropdown::None;
        }
    }

    /// Install the cities for `request`. Returns `false` and leaves the state
    /// untouched when the request is no longer current.
    pub fn apply_cities(&mut self, request: &CityRequest, cities: Vec<String>) -> bool {
        if request.generation != self.generation {
            debug!(
                state = %request.state,
                stale = request.generation,
                current = self.generation,
                "discarding stale city response"
            );
            return false;
        }

        self.cities = cities;
        self.cities_loading = false;
        true
    }

    pub fn select_city(&mut self, city: &str) -> FinderResult<()> {
        if self.selected_state.is_none() {
            return Err(FinderError::Validation("Please select a state first".into()));
        }
        if self.cities_loading {
            return Err(FinderError::Validation("Cities are still loading".into()));
        }
        if !self.cities.iter().any(|c| c == city) {
            return Err(FinderError::NotFound(format!("City {}", city)));
        }

        self.selected_city = Some(city.to_string());
        self.active = ActiveDropdown::None;
        Ok(())
    }

    /// Open or close `dropdown`, closing the other one. The city dropdown
    /// stays closed until a state is selected.
    pub fn toggle(&mut self, dropdown: Dropdown) -> ActiveDropdown {
        self.active = match (dropdown, self.active) {
            (Dropdown::State, ActiveDropdown::State) => ActiveDropdown::None,
            (Dropdown::State, _) => ActiveDropdown::State,
            (Dropdown::City, ActiveDropdown::City) => ActiveDropdown::None,
            (Dropdown::City, current) if self.selected_state.is_none() => current,
            (Dropdown::City, _) => ActiveDropdown::City,
        };
        self.active
    }

    pub fn pointer_down(&mut self, target: PointerTarget) {
        if target == PointerTarget::Outside {
            self.active = ActiveDropdown::None;
        }
    }

    pub fn can_submit(&self) -> bool {
        self.phase() == SelectionPhase::StateAndCitySelected
    }

    pub fn submit(&self) -> FinderResult<Route> {
        match (&self.selected_state, &self.selected_city) {
            (Some(state), Some(city)) => Ok(Route::search(state.as_str(), city.as_str())),
            _ => Err(FinderError::Validation(
                "Please select both state and city".into(),
            )),
        }
    }
}
