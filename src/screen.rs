// src/screen.rs
//! Weight and balance screen state.
//!
//! The form holds exactly what the pilot typed. Every edit triggers a
//! recalculation through the pure calculator, and the screen keeps the
//! last rendered result (or the input error that prevented one).

use crate::{
    error::{Result, WnbError},
    gps::{GpsKeepAlive, KeepAlive},
    store::ProfileStore,
    wnb::{
        catalog,
        compute,
        station::{format_field, parse_lenient, parse_lenient_optional, parse_optional},
        AircraftProfile, ComputationResult, Envelope, EnvelopePoint, StationEntry, StationList,
        MAX_STATIONS,
    },
};
use tracing::{debug, warn};

/// Text of one station row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationForm {
    pub description: String,
    pub location: String,
    pub weight: String,
}

/// Envelope fields that can be edited on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeField {
    CgMin,
    CgMax,
    Gross,
    Empty,
}

impl EnvelopeField {
    fn label(&self) -> &'static str {
        match self {
            EnvelopeField::CgMin => "CG min",
            EnvelopeField::CgMax => "CG max",
            EnvelopeField::Gross => "gross weight",
            EnvelopeField::Empty => "empty weight",
        }
    }
}

/// Raw form contents, one text field per input
#[derive(Debug, Clone, PartialEq)]
pub struct WnbForm {
    pub make: String,
    pub model: String,
    pub reg: String,
    pub cg_min: String,
    pub cg_max: String,
    pub gross: String,
    pub empty: String,
    pub cg_envelope: String,
    pub stations: Vec<StationForm>,
}

impl Default for WnbForm {
    fn default() -> Self {
        Self {
            make: String::new(),
            model: String::new(),
            reg: String::new(),
            cg_min: String::new(),
            cg_max: String::new(),
            gross: String::new(),
            empty: String::new(),
            cg_envelope: String::new(),
            stations: vec![StationForm::default(); MAX_STATIONS],
        }
    }
}

impl WnbForm {
    /// Fill the form from a profile. Rows without a description get
    /// blank location and weight text.
    pub fn from_profile(profile: &AircraftProfile) -> Self {
        let mut form = Self {
            make: profile.make.clone(),
            model: profile.model.clone(),
            reg: profile.reg.clone(),
            cg_min: format_field(profile.envelope.cg_min),
            cg_max: format_field(profile.envelope.cg_max),
            gross: format_field(profile.envelope.gross_weight_max),
            empty: format_field(profile.envelope.empty_weight),
            cg_envelope: EnvelopePoint::format_list(&profile.cg_envelope),
            ..Self::default()
        };

        for (row, entry) in form.stations.iter_mut().zip(profile.stations.iter()) {
            row.description = entry.description.clone();
            if entry.is_used() {
                row.location = entry.location.map(format_field).unwrap_or_default();
                row.weight = entry.weight.map(format_field).unwrap_or_default();
            }
        }

        form
    }

    fn envelope_text(&self, field: EnvelopeField) -> &str {
        match field {
            EnvelopeField::CgMin => &self.cg_min,
            EnvelopeField::CgMax => &self.cg_max,
            EnvelopeField::Gross => &self.gross,
            EnvelopeField::Empty => &self.empty,
        }
    }

    fn envelope_text_mut(&mut self, field: EnvelopeField) -> &mut String {
        match field {
            EnvelopeField::CgMin => &mut self.cg_min,
            EnvelopeField::CgMax => &mut self.cg_max,
            EnvelopeField::Gross => &mut self.gross,
            EnvelopeField::Empty => &mut self.empty,
        }
    }

    /// Parse the envelope; blank limits count as not configured (zero)
    pub fn envelope(&self) -> Result<Envelope> {
        let value = |field: EnvelopeField| -> Result<f64> {
            Ok(parse_optional(field.label(), self.envelope_text(field))?.unwrap_or(0.0))
        };

        Ok(Envelope {
            cg_min: value(EnvelopeField::CgMin)?,
            cg_max: value(EnvelopeField::CgMax)?,
            gross_weight_max: value(EnvelopeField::Gross)?,
            empty_weight: value(EnvelopeField::Empty)?,
        })
    }

    /// Parse station rows; malformed numbers are an error, blanks are skipped
    pub fn station_list(&self) -> Result<StationList> {
        let mut list = StationList::new();
        for (index, row) in self.stations.iter().enumerate() {
            list.push(StationEntry::from_text(index, &row.description, &row.location, &row.weight)?)?;
        }
        Ok(list)
    }

    /// Compute CG and weight from the current text
    pub fn calculate(&self) -> Result<ComputationResult> {
        let stations = self.station_list()?;
        let envelope = self.envelope()?;
        Ok(compute(&stations, &envelope))
    }

    /// Snapshot of the form as a profile. Unparseable numbers become zero
    /// so a half-edited form can still be charted; blank station cells
    /// stay missing.
    pub fn extract(&self) -> AircraftProfile {
        let mut profile = AircraftProfile::new(
            &self.make,
            &self.model,
            &self.reg,
            Envelope {
                cg_min: parse_lenient(&self.cg_min),
                cg_max: parse_lenient(&self.cg_max),
                gross_weight_max: parse_lenient(&self.gross),
                empty_weight: parse_lenient(&self.empty),
            },
        )
        .with_cg_envelope(EnvelopePoint::parse_list(&self.cg_envelope));

        let entries: Vec<StationEntry> = self
            .stations
            .iter()
            .map(|row| StationEntry {
                description: row.description.clone(),
                location: parse_lenient_optional(&row.location),
                weight: parse_lenient_optional(&row.weight),
            })
            .collect();
        profile.stations = StationList::try_from(entries).unwrap_or_default();
        profile
    }
}

/// The calculator screen: form state, profile list and GPS keep-alive
pub struct WnbScreen<K: KeepAlive = GpsKeepAlive> {
    form: WnbForm,
    profiles: Vec<AircraftProfile>,
    result: Option<ComputationResult>,
    input_error: Option<String>,
    summary_visible: bool,
    keep_alive: K,
}

impl<K: KeepAlive> WnbScreen<K> {
    /// Seed the screen with the built-in catalog, showing its last entry
    pub fn new(keep_alive: K) -> Self {
        let profiles = catalog::builtin_profiles();
        let form = profiles.last().map(WnbForm::from_profile).unwrap_or_default();

        let mut screen = Self {
            form,
            profiles,
            result: None,
            input_error: None,
            summary_visible: true,
            keep_alive,
        };
        screen.recalc();
        screen
    }

    pub fn form(&self) -> &WnbForm {
        &self.form
    }

    pub fn keep_alive(&self) -> &K {
        &self.keep_alive
    }

    /// Last successful computation, cleared when the form has an input error
    pub fn result(&self) -> Option<&ComputationResult> {
        self.result.as_ref()
    }

    pub fn input_error(&self) -> Option<&str> {
        self.input_error.as_deref()
    }

    pub fn summary_visible(&self) -> bool {
        self.summary_visible
    }

    pub fn toggle_summary(&mut self) -> bool {
        self.summary_visible = !self.summary_visible;
        self.summary_visible
    }

    /// Append saved profiles to the load list
    pub fn add_profiles<I>(&mut self, profiles: I)
    where
        I: IntoIterator<Item = AircraftProfile>,
    {
        self.profiles.extend(profiles);
    }

    /// Entries offered by the load list
    pub fn profile_names(&self) -> Vec<String> {
        self.profiles.iter().map(AircraftProfile::display_name).collect()
    }

    pub fn load(&mut self, index: usize) -> Result<()> {
        let profile = self
            .profiles
            .get(index)
            .ok_or_else(|| WnbError::NotFound(format!("profile #{}", index)))?
            .clone();
        self.populate(&profile);
        Ok(())
    }

    pub fn load_named(&mut self, name: &str) -> Result<()> {
        let index = self
            .profiles
            .iter()
            .rposition(|p| p.matches(name))
            .ok_or_else(|| WnbError::NotFound(name.to_string()))?;
        self.load(index)
    }

    pub fn populate(&mut self, profile: &AircraftProfile) {
        debug!(profile = %profile.display_name(), "populating form");
        self.form = WnbForm::from_profile(profile);
        self.recalc();
    }

    /// Recalculate from the form, remembering the result or the input error
    pub fn recalc(&mut self) -> Option<&ComputationResult> {
        match self.form.calculate() {
            Ok(result) => {
                self.result = Some(result);
                self.input_error = None;
            }
            Err(e) => {
                debug!(error = %e, "form has invalid input");
                self.result = None;
                self.input_error = Some(e.to_string());
            }
        }
        self.result.as_ref()
    }

    fn row_mut(&mut self, index: usize) -> Result<&mut StationForm> {
        self.form
            .stations
            .get_mut(index)
            .ok_or(WnbError::StationIndex { index, max: MAX_STATIONS })
    }

    pub fn set_description(&mut self, index: usize, text: &str) -> Result<()> {
        self.row_mut(index)?.description = text.to_string();
        self.recalc();
        Ok(())
    }

    pub fn set_location(&mut self, index: usize, text: &str) -> Result<()> {
        self.row_mut(index)?.location = text.to_string();
        self.recalc();
        Ok(())
    }

    pub fn set_weight(&mut self, index: usize, text: &str) -> Result<()> {
        self.row_mut(index)?.weight = text.to_string();
        self.recalc();
        Ok(())
    }

    pub fn set_station(&mut self, index: usize, description: &str, location: &str, weight: &str) -> Result<()> {
        let row = self.row_mut(index)?;
        row.description = description.to_string();
        row.location = location.to_string();
        row.weight = weight.to_string();
        self.recalc();
        Ok(())
    }

    pub fn set_envelope(&mut self, field: EnvelopeField, text: &str) {
        *self.form.envelope_text_mut(field) = text.to_string();
        self.recalc();
    }

    /// Profile built from the form, including the last computed values
    pub fn extract(&self) -> AircraftProfile {
        let mut profile = self.form.extract();
        if let Some(result) = &self.result {
            profile.weight = result.total_weight;
            profile.cg = result.center_of_gravity;
        }
        profile
    }

    /// JSON handed to the CG chart view
    pub fn graph_json(&self) -> Result<String> {
        self.extract().to_json()
    }

    /// Identity the save dialog starts from
    pub fn save_defaults(&self) -> (String, String, String) {
        (self.form.make.clone(), self.form.model.clone(), self.form.reg.clone())
    }

    /// Save the form under a new identity. Nothing is stored and the form
    /// is left untouched when any identity field is blank.
    pub fn save(&mut self, make: &str, model: &str, reg: &str, store: &mut ProfileStore) -> Result<String> {
        let mut profile = self.extract();
        profile.make = make.to_string();
        profile.model = model.to_string();
        profile.reg = reg.to_string();

        let key = store.save(&profile)?;

        self.form.make = profile.make.clone();
        self.form.model = profile.model.clone();
        self.form.reg = profile.reg.clone();

        match self.profiles.iter_mut().find(|p| p.display_name() == key) {
            Some(existing) => *existing = profile,
            None => self.profiles.push(profile),
        }
        Ok(key)
    }

    /// Screen became visible: keep the GPS alive
    pub fn show(&mut self) {
        if let Err(e) = self.keep_alive.subscribe() {
            warn!(error = %e, "could not keep GPS alive");
        }
    }

    /// Screen hidden: let the GPS go
    pub fn hide(&mut self) {
        self.keep_alive.unsubscribe();
    }
}
