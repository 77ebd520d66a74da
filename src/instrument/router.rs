//! Instrument router — looks up the adapter a track is bound to.

use std::collections::HashMap;

use crate::composition::InstrumentId;
use crate::config::{InstrumentConfig, InstrumentKind};
use crate::error::{Error, Result};

use super::{
    ArcInstrument, BasicInstrument, Emission, GlideInstrument, Instrument, NoteContext, Voice,
};

/// Maps instrument ids to registered adapters.
pub struct InstrumentRouter {
    routes: HashMap<InstrumentId, Box<dyn Instrument>>,
}

impl InstrumentRouter {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// Register an adapter under its own id, replacing any previous one.
    pub fn register(&mut self, instrument: Box<dyn Instrument>) {
        self.routes.insert(instrument.id(), instrument);
    }

    pub fn with(mut self, instrument: impl Instrument + 'static) -> Self {
        self.register(Box::new(instrument));
        self
    }

    pub fn get(&self, id: InstrumentId) -> Option<&dyn Instrument> {
        self.routes.get(&id).map(|inst| inst.as_ref())
    }

    pub fn contains(&self, id: InstrumentId) -> bool {
        self.routes.contains_key(&id)
    }

    /// Emit a note through the instrument registered as `id`.
    pub fn emit(&self, id: InstrumentId, note: &NoteContext<'_>) -> Result<Emission> {
        self.get(id)
            .map(|inst| inst.emit(note))
            .ok_or(Error::UnknownInstrument(id))
    }

    /// Registered ids in ascending order.
    pub fn ids(&self) -> Vec<InstrumentId> {
        let mut ids: Vec<InstrumentId> = self.routes.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Build a router from configured instrument entries.
    pub fn from_configs(configs: &[InstrumentConfig]) -> Self {
        let mut router = Self::new();

        for config in configs {
            let mut voice =
                Voice::new(config.instrument_id()).with_staccato_factor(config.staccato_factor);
            if let Some(name) = &config.name {
                voice = voice.with_name(name.clone());
            }
            let instrument: Box<dyn Instrument> = match config.kind {
                InstrumentKind::Basic => Box::new(BasicInstrument::from_voice(voice)),
                InstrumentKind::Arc => Box::new(ArcInstrument::from_voice(voice)),
                InstrumentKind::Glide => Box::new(GlideInstrument::from_voice(voice)),
            };
            router.register(instrument);
        }

        router
    }
}

impl Default for InstrumentRouter {
    fn default() -> Self {
        Self::new()
    }
}
