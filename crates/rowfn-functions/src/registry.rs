//! Name -> function factory lookup consumed by the host's dispatcher.
//!
//! Names are matched case-insensitively. The registry is immutable once
//! built and can be shared across threads; the instances it hands out cannot.

use std::collections::HashMap;

use rowfn_core::prelude::FunctionConfig;

use crate::descriptor::FunctionDescriptor;
use crate::math::{Ceiling, Floor, Negate, Pi, Power, CEILING, FLOOR, NEGATE, PI, POWER};
use crate::random::{Random, RANDOM};
use crate::to_number::{ToNumber, TO_NUMBER};
use crate::traits::{FnError, ScalarFunction};

/// Builds a fresh, exclusively owned instance.
pub type Factory = fn(&FunctionConfig) -> Box<dyn ScalarFunction>;

#[derive(Default)]
pub struct Registry {
    entries: Vec<(&'static FunctionDescriptor, Factory)>,
    by_name: HashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// All built-in functions.
    pub fn builtin() -> Self {
        let builtins: [(&'static FunctionDescriptor, Factory); 7] = [
            (&NEGATE, |_| Box::new(Negate)),
            (&POWER, |_| Box::new(Power)),
            (&PI, |_| Box::new(Pi)),
            (&CEILING, |_| Box::new(Ceiling)),
            (&FLOOR, |_| Box::new(Floor)),
            (&RANDOM, |cfg| Box::new(Random::new(cfg))),
            (&TO_NUMBER, |cfg| Box::new(ToNumber::new(cfg))),
        ];
        let mut registry = Self::new();
        for (descriptor, factory) in builtins {
            registry.insert(descriptor, factory);
        }
        registry
    }

    /// Register a function under all of its names. Fails if any name is taken.
    pub fn register(
        &mut self,
        descriptor: &'static FunctionDescriptor,
        factory: Factory,
    ) -> Result<(), FnError> {
        if descriptor.names.is_empty() {
            return Err(FnError::Registry("function has no names".into()));
        }
        if let Some(taken) = descriptor
            .names
            .iter()
            .find(|name| self.by_name.contains_key(&name.to_ascii_lowercase()))
        {
            return Err(FnError::Registry(format!(
                "name '{}' is already registered",
                taken
            )));
        }
        self.insert(descriptor, factory);
        Ok(())
    }

    fn insert(&mut self, descriptor: &'static FunctionDescriptor, factory: Factory) {
        let idx = self.entries.len();
        self.entries.push((descriptor, factory));
        for name in descriptor.names {
            self.by_name.insert(name.to_ascii_lowercase(), idx);
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&'static FunctionDescriptor> {
        self.by_name
            .get(&name.to_ascii_lowercase())
            .map(|&idx| self.entries[idx].0)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Create a new instance. The caller still runs `setup` before `eval`.
    pub fn instantiate(
        &self,
        name: &str,
        config: &FunctionConfig,
    ) -> Result<Box<dyn ScalarFunction>, FnError> {
        let idx = *self
            .by_name
            .get(&name.to_ascii_lowercase())
            .ok_or_else(|| FnError::UnknownFunction(name.to_string()))?;
        #[cfg(feature = "tracing")]
        tracing::trace!(
            requested = name,
            function = self.entries[idx].0.primary_name(),
            "instantiating scalar function"
        );
        let factory = self.entries[idx].1;
        Ok(factory(config))
    }

    /// Descriptors in registration order, one per function.
    pub fn descriptors(&self) -> impl Iterator<Item = &'static FunctionDescriptor> + '_ {
        self.entries.iter().map(|(descriptor, _)| *descriptor)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
