//! Identifier registry: binds data identifiers to the [`ValueCodec`] used to
//! decode their values in meter responses.
//!
//! Registrations take the conventional DI3-first identifier and convert it to
//! wire order exactly once; every lookup afterwards is by wire-order
//! [`DataIdent`]. The table sits behind a reader-writer lock so registration
//! may overlap with dispatch, and clones share the same table.
//!
//! Registries can also be loaded from JSON:
//!
//! ```json
//! [
//!   { "ident": "02010100", "width": 2, "ratio": 0.1, "unit": "V" },
//!   { "ident": "02800002", "width": 2, "order": "little", "ratio": 0.01, "offset": 0, "unit": "Hz" }
//! ]
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::constants::DLT645_IDENT_LEN;
use crate::error::Dlt645Error;
use crate::payload::data_encoding::{ByteOrder, ValueCodec};
use crate::payload::ident::DataIdent;

/// A well-known DL/T 645-2007 identifier and its standard value format.
#[derive(Debug, Clone, PartialEq)]
pub struct KnownIdent {
    pub ident: DataIdent,
    pub name: &'static str,
    pub width: usize,
    pub ratio: f64,
    pub unit: &'static str,
}

impl KnownIdent {
    const fn new(
        ident: u32,
        name: &'static str,
        width: usize,
        ratio: f64,
        unit: &'static str,
    ) -> Self {
        Self {
            ident: DataIdent::from_u32(ident),
            name,
            width,
            ratio,
            unit,
        }
    }
}

/// Commonly read identifiers with their standard widths and resolutions.
pub static KNOWN_IDENTS: Lazy<HashMap<DataIdent, KnownIdent>> = Lazy::new(|| {
    [
        // Energy, XXXXXX.XX kWh
        KnownIdent::new(0x0000_0000, "Combined active energy total", 4, 0.01, "kWh"),
        KnownIdent::new(0x0001_0000, "Forward active energy total", 4, 0.01, "kWh"),
        KnownIdent::new(0x0002_0000, "Reverse active energy total", 4, 0.01, "kWh"),
        // Voltage, XXX.X V
        KnownIdent::new(0x0201_0100, "Phase A voltage", 2, 0.1, "V"),
        KnownIdent::new(0x0201_0200, "Phase B voltage", 2, 0.1, "V"),
        KnownIdent::new(0x0201_0300, "Phase C voltage", 2, 0.1, "V"),
        // Current, XXX.XXX A
        KnownIdent::new(0x0202_0100, "Phase A current", 3, 0.001, "A"),
        KnownIdent::new(0x0202_0200, "Phase B current", 3, 0.001, "A"),
        KnownIdent::new(0x0202_0300, "Phase C current", 3, 0.001, "A"),
        // Power, XX.XXXX kW
        KnownIdent::new(0x0203_0000, "Total active power", 3, 0.0001, "kW"),
        KnownIdent::new(0x0206_0000, "Total power factor", 2, 0.001, ""),
        KnownIdent::new(0x0280_0002, "Grid frequency", 2, 0.01, "Hz"),
    ]
    .into_iter()
    .map(|known| (known.ident, known))
    .collect()
});

/// Looks up the name and standard format of a well-known identifier.
pub fn describe_ident(ident: &DataIdent) -> Option<&'static KnownIdent> {
    KNOWN_IDENTS.get(ident)
}

/// One registry entry as written in a JSON configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodecEntry {
    /// Conventional DI3-first hex form, e.g. `"02010100"`.
    pub ident: String,
    pub width: usize,
    #[serde(default)]
    pub order: ByteOrder,
    #[serde(default = "default_ratio")]
    pub ratio: f64,
    #[serde(default)]
    pub offset: f64,
    #[serde(default)]
    pub unit: String,
}

fn default_ratio() -> f64 {
    1.0
}

impl CodecEntry {
    fn to_codec(&self) -> Result<([u8; DLT645_IDENT_LEN], ValueCodec), Dlt645Error> {
        let ident = DataIdent::parse(&self.ident)
            .map_err(|e| Dlt645Error::Config(format!("entry {:?}: {e}", self.ident)))?;
        let codec = ValueCodec::new(self.width, self.order, self.ratio, self.offset, &*self.unit)
            .map_err(|e| Dlt645Error::Config(format!("entry {:?}: {e}", self.ident)))?;
        Ok((ident.to_be_bytes(), codec))
    }
}

#[derive(Debug, Default, Clone)]
pub struct IdentRegistry {
    inner: Arc<RwLock<HashMap<DataIdent, Arc<ValueCodec>>>>,
}

impl IdentRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `codec` for an identifier given in conventional DI3-first
    /// order (e.g. `[0x02, 0x01, 0x01, 0x00]`). Returns the codec it replaced.
    pub fn register(
        &self,
        ident: [u8; DLT645_IDENT_LEN],
        codec: ValueCodec,
    ) -> Option<Arc<ValueCodec>> {
        let key = DataIdent::from_be_bytes(ident);
        debug!("Registering value codec for identifier {key}");
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.insert(key, Arc::new(codec))
    }

    /// Removes a registration; returns the codec that was bound, if any.
    pub fn unregister(&self, ident: &DataIdent) -> Option<Arc<ValueCodec>> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.remove(ident)
    }

    /// Looks up the codec for a wire-order identifier.
    pub fn get(&self, ident: &DataIdent) -> Option<Arc<ValueCodec>> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.get(ident).cloned()
    }

    pub fn contains(&self, ident: &DataIdent) -> bool {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.contains_key(ident)
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered identifiers, sorted.
    pub fn idents(&self) -> Vec<DataIdent> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let mut idents: Vec<DataIdent> = inner.keys().copied().collect();
        idents.sort();
        idents
    }

    /// Create a new registry with the well-known identifiers registered
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        for known in KNOWN_IDENTS.values() {
            // Table entries are constants with non-zero width and ratio.
            if let Ok(codec) = ValueCodec::scaled(known.width, known.ratio, known.unit) {
                registry.register(known.ident.to_be_bytes(), codec);
            }
        }
        registry
    }

    /// Registers every entry of a JSON array of [`CodecEntry`]. Nothing is
    /// registered if any entry is invalid.
    pub fn load_json(&self, json: &str) -> Result<usize, Dlt645Error> {
        let entries: Vec<CodecEntry> = serde_json::from_str(json)?;
        let codecs = entries
            .iter()
            .map(CodecEntry::to_codec)
            .collect::<Result<Vec<_>, _>>()?;

        let count = codecs.len();
        for (ident, codec) in codecs {
            self.register(ident, codec);
        }
        Ok(count)
    }

    pub fn from_json_str(json: &str) -> Result<Self, Dlt645Error> {
        let registry = Self::new();
        registry.load_json(json)?;
        Ok(registry)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Dlt645Error> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
