//! Configuration options for the encoding layer.

use serde::{Deserialize, Serialize};

/// Default initial capacity of an output buffer, in bytes.
pub const DEFAULT_INITIAL_CAPACITY: usize = 128;

/// Options controlling buffer allocation and deserialization checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Capacity of a freshly created output buffer (in bytes).
    /// Must be a power of two.
    /// Default: 128
    pub initial_capacity: usize,

    /// Verify that untrusted serializers consume exactly the bytes they were
    /// handed when going through `deserialize_guarded`.
    /// Default: true
    pub verify_untrusted: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            verify_untrusted: true,
        }
    }
}

impl Options {
    /// Creates a new Options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial buffer capacity.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Enables or disables the extra checks for untrusted serializers.
    pub fn verify_untrusted(mut self, value: bool) -> Self {
        self.verify_untrusted = value;
        self
    }

    /// Parses options from a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let opts: Options = serde_json::from_str(json)
            .map_err(|e| crate::Error::invalid_argument(format!("invalid options: {}", e)))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Validates the options and returns an error if any are invalid.
    pub fn validate(&self) -> crate::Result<()> {
        if self.initial_capacity == 0 {
            return Err(crate::Error::invalid_argument(
                "initial_capacity must be > 0",
            ));
        }
        if !self.initial_capacity.is_power_of_two() {
            return Err(crate::Error::invalid_argument(
                "initial_capacity must be a power of two",
            ));
        }
        Ok(())
    }
}
