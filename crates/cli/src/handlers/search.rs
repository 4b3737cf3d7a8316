use std::io::Write;

use eyre::{Result, eyre};

use medfind_client::{DirectoryClient, centers_or_empty, cities_or_empty, states_or_empty};
use medfind_core::{models::center::Center, navigation::Route, selection::SelectionState};

/// Walk the search form: load states, pick `state`, wait for its cities,
/// pick `city`, submit, then show the results page.
pub async fn handle_search<D, W>(directory: &D, state: &str, city: &str, out: &mut W) -> Result<()>
where
    D: DirectoryClient + ?Sized,
    W: Write,
{
    let mut selection = SelectionState::new();
    selection.set_states(states_or_empty(directory).await);

    let request = selection.select_state(state)?;
    let cities = cities_or_empty(directory, &request.state).await;
    selection.apply_cities(&request, cities);
    selection.select_city(city)?;

    let route = selection.submit()?;
    writeln!(out, "Searching {}", route.path())?;

    show_results(directory, &route, out).await?;
    Ok(())
}

/// Render the results page for a search route and return the centers shown.
pub async fn show_results<D, W>(directory: &D, route: &Route, out: &mut W) -> Result<Vec<Center>>
where
    D: DirectoryClient + ?Sized,
    W: Write,
{
    let Route::Search { state, city } = route else {
        return Err(eyre!("{} is not a search route", route.path()));
    };

    let centers = centers_or_empty(directory, state, city).await;
    writeln!(
        out,
        "{} medical centers available in {}",
        centers.len(),
        city.to_lowercase()
    )?;
    for (index, center) in centers.iter().enumerate() {
        write_center(out, index, center)?;
    }
    Ok(centers)
}

fn write_center<W: Write>(out: &mut W, index: usize, center: &Center) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "[{}] {}", index, center.hospital_name)?;
    writeln!(out, "    Address: {}", center.address)?;
    writeln!(out, "    City: {}", center.city)?;
    writeln!(out, "    State: {}", center.state)?;
    writeln!(out, "    ZIP Code: {}", center.zip_code)?;
    writeln!(out, "    Overall Rating: {}", center.rating_label())?;
    Ok(())
}
