// File: config.rs
// Analysis parameters and capacity limits, stored as TOML

use std::io::{BufRead, Write};

use toml::map::Map;

use crate::error::{Result, SocketError};
use crate::structure::descriptor::DescriptorOptions;
use crate::structure::io::ReadOptions;
use crate::utils::log::Verbosity;

/// Capacity maxima. Exceeding any of them stops the analysis; they are only
/// ever reached when the cutoff is unreasonably large.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub knobs: usize,
    pub complementary_knobs: usize,
    pub daisy_chains: usize,
    pub daisy_chain_length: usize,
    pub coiled_coils: usize,
    pub helix_pairs: usize,
    pub duplicates: usize,
    pub helices: usize,
    pub residues: usize,
    pub atoms: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            knobs: 6000,
            complementary_knobs: 3,
            daisy_chains: 300,
            daisy_chain_length: 40,
            coiled_coils: 250,
            helix_pairs: 150,
            duplicates: 50,
            helices: 1000,
            residues: 20000,
            atoms: 100000,
        }
    }
}

impl Limits {
    fn fields(&self) -> [(&'static str, usize); 10] {
        [
            ("knobs", self.knobs),
            ("complementary_knobs", self.complementary_knobs),
            ("daisy_chains", self.daisy_chains),
            ("daisy_chain_length", self.daisy_chain_length),
            ("coiled_coils", self.coiled_coils),
            ("helix_pairs", self.helix_pairs),
            ("duplicates", self.duplicates),
            ("helices", self.helices),
            ("residues", self.residues),
            ("atoms", self.atoms),
        ]
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut usize> {
        match name {
            "knobs" => Some(&mut self.knobs),
            "complementary_knobs" => Some(&mut self.complementary_knobs),
            "daisy_chains" => Some(&mut self.daisy_chains),
            "daisy_chain_length" => Some(&mut self.daisy_chain_length),
            "coiled_coils" => Some(&mut self.coiled_coils),
            "helix_pairs" => Some(&mut self.helix_pairs),
            "duplicates" => Some(&mut self.duplicates),
            "helices" => Some(&mut self.helices),
            "residues" => Some(&mut self.residues),
            "atoms" => Some(&mut self.atoms),
            _ => None,
        }
    }

    pub fn from_toml(toml: &toml::Value) -> Result<Self> {
        let mut limits = Limits::default();
        let table = toml.as_table().ok_or_else(|| config_error("limits must be a table"))?;
        for (key, value) in table {
            let field = limits.field_mut(key).ok_or_else(|| config_error(&format!("unknown limit '{}'", key)))?;
            *field = as_usize(key, value)?;
        }
        Ok(limits)
    }

    pub fn to_toml(&self) -> toml::Value {
        let mut map = Map::new();
        for (name, value) in self.fields() {
            map.insert(name.to_string(), toml::Value::Integer(value as i64));
        }
        toml::Value::Table(map)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SocketConfig {
    /// Centroid distance below which two side chains are in contact
    pub packing_cutoff: f32,
    /// Mean knob-end to hole distance below which a knob is in, not across, the hole
    pub insertion_cutoff: f32,
    /// Minimum knob type reported and used for pairwise coiled coils
    pub knob_threshold: usize,
    /// Residues added to each end of every helix
    pub extend: usize,
    pub reference_atom: String,
    pub include_alpha_carbons: bool,
    pub include_all_atoms: bool,
    pub quiet: bool,
    pub verbose: bool,
    pub debug: bool,
    pub limits: Limits,
}

impl Default for SocketConfig {
    fn default() -> Self {
        SocketConfig {
            packing_cutoff: 7.0,
            insertion_cutoff: 7.0,
            knob_threshold: 3,
            extend: 0,
            reference_atom: "CA".to_string(),
            include_alpha_carbons: false,
            include_all_atoms: false,
            quiet: false,
            verbose: false,
            debug: false,
            limits: Limits::default(),
        }
    }
}

impl SocketConfig {
    pub fn new(packing_cutoff: f32, extend: usize, knob_threshold: usize) -> Self {
        SocketConfig { packing_cutoff, extend, knob_threshold, ..Default::default() }
    }

    /// Keys missing from the table keep their default value.
    pub fn from_toml(toml: &toml::Value) -> Result<Self> {
        let mut config = SocketConfig::default();
        let table = toml.as_table().ok_or_else(|| config_error("configuration must be a table"))?;
        for (key, value) in table {
            match key.as_str() {
                "packing_cutoff" => config.packing_cutoff = as_f32(key, value)?,
                "insertion_cutoff" => config.insertion_cutoff = as_f32(key, value)?,
                "knob_threshold" => config.knob_threshold = as_usize(key, value)?,
                "extend" => config.extend = as_usize(key, value)?,
                "reference_atom" => {
                    config.reference_atom = value.as_str()
                        .ok_or_else(|| config_error("reference_atom must be a string"))?
                        .to_string()
                }
                "include_alpha_carbons" => config.include_alpha_carbons = as_bool(key, value)?,
                "include_all_atoms" => config.include_all_atoms = as_bool(key, value)?,
                "quiet" => config.quiet = as_bool(key, value)?,
                "verbose" => config.verbose = as_bool(key, value)?,
                "debug" => config.debug = as_bool(key, value)?,
                "limits" => config.limits = Limits::from_toml(value)?,
                _ => return Err(config_error(&format!("unknown key '{}'", key))),
            }
        }
        Ok(config)
    }

    pub fn to_toml(&self) -> toml::Value {
        let mut map = Map::new();
        map.insert("packing_cutoff".to_string(), toml::Value::Float(self.packing_cutoff as f64));
        map.insert("insertion_cutoff".to_string(), toml::Value::Float(self.insertion_cutoff as f64));
        map.insert("knob_threshold".to_string(), toml::Value::Integer(self.knob_threshold as i64));
        map.insert("extend".to_string(), toml::Value::Integer(self.extend as i64));
        map.insert("reference_atom".to_string(), toml::Value::String(self.reference_atom.clone()));
        map.insert("include_alpha_carbons".to_string(), toml::Value::Boolean(self.include_alpha_carbons));
        map.insert("include_all_atoms".to_string(), toml::Value::Boolean(self.include_all_atoms));
        map.insert("quiet".to_string(), toml::Value::Boolean(self.quiet));
        map.insert("verbose".to_string(), toml::Value::Boolean(self.verbose));
        map.insert("debug".to_string(), toml::Value::Boolean(self.debug));
        map.insert("limits".to_string(), self.limits.to_toml());
        toml::Value::Table(map)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.packing_cutoff.is_finite() && self.packing_cutoff > 0.0) {
            return Err(config_error(&format!("packing cutoff must be positive, got {}", self.packing_cutoff)));
        }
        if !(self.insertion_cutoff.is_finite() && self.insertion_cutoff > 0.0) {
            return Err(config_error(&format!("insertion cutoff must be positive, got {}", self.insertion_cutoff)));
        }
        if self.knob_threshold > 4 {
            return Err(config_error(&format!(
                "knob threshold must be between 0 and 4, got {}", self.knob_threshold
            )));
        }
        if self.extend > 2 {
            return Err(config_error(&format!("helix extension must be between 0 and 2, got {}", self.extend)));
        }
        normalize_atom_name(&self.reference_atom)?;
        if let Some((name, _)) = self.limits.fields().iter().find(|(_, value)| *value == 0) {
            return Err(config_error(&format!("limit '{}' must be at least 1", name)));
        }
        Ok(())
    }

    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose, self.debug)
    }

    /// Reference atom in 4-column PDB form
    pub fn reference_atom_name(&self) -> Result<[u8; 4]> {
        normalize_atom_name(&self.reference_atom)
    }

    pub fn read_options(&self) -> ReadOptions {
        ReadOptions {
            extend: self.extend,
            include_all_atoms: self.include_all_atoms,
            max_helices: self.limits.helices,
            max_residues: self.limits.residues,
            max_atoms: self.limits.atoms,
            verbosity: self.verbosity(),
        }
    }

    pub fn descriptor_options(&self) -> Result<DescriptorOptions> {
        Ok(DescriptorOptions {
            reference_atom: self.reference_atom_name()?,
            include_alpha_carbons: self.include_alpha_carbons,
        })
    }
}

/// Convert a user-supplied atom name ("CA", "cb", "OXT", "1HA") to the
/// 4-column form used in PDB files. Names starting with a letter get a
/// leading space unless they already fill all four columns.
pub fn normalize_atom_name(name: &str) -> Result<[u8; 4]> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.len() > 4 {
        return Err(config_error(&format!("invalid atom name '{}'", name)));
    }
    if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(config_error(&format!("atom name '{}' contains invalid characters", name)));
    }
    let mut padded = String::with_capacity(4);
    if trimmed.len() < 4 && trimmed.starts_with(|c: char| c.is_ascii_alphabetic()) {
        padded.push(' ');
    }
    padded.push_str(&trimmed.to_ascii_uppercase());
    while padded.len() < 4 {
        padded.push(' ');
    }
    let bytes = padded.as_bytes();
    Ok([bytes[0], bytes[1], bytes[2], bytes[3]])
}

fn config_error(msg: &str) -> SocketError {
    SocketError::Config(msg.to_string())
}

fn as_f32(key: &str, value: &toml::Value) -> Result<f32> {
    value.as_float()
        .or_else(|| value.as_integer().map(|i| i as f64))
        .map(|x| x as f32)
        .ok_or_else(|| config_error(&format!("{} must be a number", key)))
}

fn as_usize(key: &str, value: &toml::Value) -> Result<usize> {
    match value.as_integer() {
        Some(i) if i >= 0 => Ok(i as usize),
        _ => Err(config_error(&format!("{} must be a non-negative integer", key))),
    }
}

fn as_bool(key: &str, value: &toml::Value) -> Result<bool> {
    value.as_bool().ok_or_else(|| config_error(&format!("{} must be true or false", key)))
}

pub fn write_socket_config_to_file(path: &str, config: &SocketConfig) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    let text = toml::to_string(&config.to_toml()).map_err(|e| SocketError::Parse(e.to_string()))?;
    file.write_all(text.as_bytes())?;
    Ok(())
}

pub fn read_socket_config_from_file(path: &str) -> Result<SocketConfig> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    let mut text = String::new();
    for line in reader.lines() {
        text.push_str(&line?);
        text.push('\n');
    }
    let toml: toml::Value = toml::from_str(&text).map_err(|e| SocketError::Parse(format!("{}: {}", path, e)))?;
    SocketConfig::from_toml(&toml)
}
