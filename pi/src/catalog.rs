//! Built-in destination catalog
//!
//! A static, read-only dataset initialized once per process. The collection
//! is fully loaded before the first query and never changes afterwards.

use std::sync::OnceLock;

use crate::{Catalog, Place};

static BUILTIN: OnceLock<Catalog> = OnceLock::new();

/// (code, primary label, secondary label, region)
const PLACES: &[(&str, &str, &str, &str)] = &[
    ("BKK", "Bangkok", "Suvarnabhumi Airport", "Thailand"),
    ("HAN", "Hanoi", "Noi Bai International Airport", "Vietnam"),
    ("CAI", "Cairo", "Cairo International Airport", "Egypt"),
    ("DEL", "Delhi", "Indira Gandhi International Airport", "India"),
    ("LIS", "Lisbon", "Humberto Delgado Airport", "Portugal"),
    ("KRK", "Krakow", "John Paul II International Airport", "Poland"),
    ("BCN", "Barcelona", "Josep Tarradellas Barcelona-El Prat Airport", "Spain"),
    ("PRG", "Prague", "Vaclav Havel Airport", "Czech Republic"),
    ("BUD", "Budapest", "Ferenc Liszt International Airport", "Hungary"),
    ("MEX", "Mexico City", "Benito Juarez International Airport", "Mexico"),
    ("DPS", "Bali", "Ngurah Rai International Airport", "Indonesia"),
    ("CDG", "Paris", "Charles de Gaulle Airport", "France"),
    ("ORY", "Paris", "Orly Airport", "France"),
    ("FCO", "Rome", "Leonardo da Vinci-Fiumicino Airport", "Italy"),
    ("AMS", "Amsterdam", "Schiphol Airport", "Netherlands"),
    ("HND", "Tokyo", "Haneda Airport", "Japan"),
    ("NRT", "Tokyo", "Narita International Airport", "Japan"),
    ("SYD", "Sydney", "Kingsford Smith Airport", "Australia"),
    ("BER", "Berlin", "Berlin Brandenburg Airport", "Germany"),
    ("LHR", "London", "Heathrow Airport", "United Kingdom"),
    ("LGW", "London", "Gatwick Airport", "United Kingdom"),
    ("JFK", "New York", "John F. Kennedy International Airport", "United States"),
    ("EWR", "New York", "Newark Liberty International Airport", "United States"),
    ("DXB", "Dubai", "Dubai International Airport", "United Arab Emirates"),
    ("SIN", "Singapore", "Changi Airport", "Singapore"),
    ("SFO", "San Francisco", "San Francisco International Airport", "United States"),
    ("MLE", "Maldives", "Velana International Airport", "Maldives"),
    ("ZRH", "Zurich", "Zurich Airport", "Switzerland"),
];

/// The shared built-in catalog.
pub fn builtin() -> &'static Catalog {
    BUILTIN.get_or_init(|| {
        Catalog::new(
            PLACES
                .iter()
                .map(|&(code, primary, secondary, region)| Place::new(primary, secondary, code, region))
                .collect(),
        )
    })
}
