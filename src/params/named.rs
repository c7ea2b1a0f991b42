use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::debug;

use super::ParameterSpec;
use crate::error::Error;

/// Canonical name of the Ed25519 parameter set.
pub const ED_25519: &str = "Ed25519";

/// The process-wide Ed25519 parameters over the limb backend.
///
/// Built on first use; the comb table of its base point is then shared by
/// every key created from it.
pub fn ed25519() -> Result<Arc<ParameterSpec>, Error> {
    static SHARED: OnceCell<Arc<ParameterSpec>> = OnceCell::new();

    SHARED
        .get_or_try_init(|| ParameterSpec::ed25519().map(Arc::new))
        .cloned()
}

/// A parameter set registered under a name.
#[derive(Clone, Debug)]
pub struct NamedCurveSpec {
    name: String,
    params: Arc<ParameterSpec>,
}

impl NamedCurveSpec {
    pub fn new(name: impl Into<String>, params: Arc<ParameterSpec>) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &Arc<ParameterSpec> {
        &self.params
    }
}

/// Name → parameter set registry with case-insensitive lookup.
#[derive(Clone, Debug)]
pub struct NamedCurveTable {
    curves: HashMap<String, Arc<NamedCurveSpec>>,
}

impl NamedCurveTable {
    /// A table holding [`ED_25519`].
    pub fn new() -> Result<Self, Error> {
        let mut table = Self {
            curves: HashMap::new(),
        };
        table.define_curve(NamedCurveSpec::new(ED_25519, ed25519()?));
        Ok(table)
    }

    /// Registers `spec` under its own name, replacing any previous entry.
    pub fn define_curve(&mut self, spec: NamedCurveSpec) {
        debug!(name = spec.name(), "defined curve");
        self.curves
            .insert(spec.name().to_ascii_lowercase(), Arc::new(spec));
    }

    /// Makes `alias` resolve to the curve registered as `name`.
    pub fn define_curve_alias(&mut self, name: &str, alias: &str) -> Result<(), Error> {
        let spec = self.require(name)?;
        debug!(name, alias, "defined curve alias");
        self.curves.insert(alias.to_ascii_lowercase(), spec);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<NamedCurveSpec>> {
        self.curves.get(&name.to_ascii_lowercase()).cloned()
    }

    /// Like [`get`](Self::get), but an unknown name is an error.
    pub fn require(&self, name: &str) -> Result<Arc<NamedCurveSpec>, Error> {
        self.get(name)
            .ok_or_else(|| Error::UnknownCurve(name.to_string()))
    }
}
