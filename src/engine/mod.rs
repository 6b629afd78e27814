mod place_command_api;
mod place_query_api;

use crate::api::API;
use crate::db::PlaceStore;

pub struct Engine<S> {
    store: S,
}

impl<S: PlaceStore> Engine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: PlaceStore> API for Engine<S> {}
