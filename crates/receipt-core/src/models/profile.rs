//! Store profile: the read-only description of the selling business.
//!
//! Profiles persist as a flat `key=value` text file, one setting per line.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConfigError;

/// Default printable width, in layout units.
pub const DEFAULT_PAGE_WIDTH: f32 = 280.0;

/// Store configuration consumed by the layout engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreProfile {
    /// Store name printed at the top of the receipt.
    pub name: String,

    pub address: String,

    pub phone: String,

    pub email: String,

    /// Logo image printed above the header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_path: Option<PathBuf>,

    /// Target printer (empty = system default).
    pub printer_name: String,

    /// Literal symbol placed before every amount.
    pub currency: String,

    /// Printable width of the page, in layout units.
    pub page_width: f32,

    /// Whether this terminal has a cash drawer that may be opened.
    pub enable_cash_drawer: bool,
}

impl Default for StoreProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            address: String::new(),
            phone: String::new(),
            email: String::new(),
            logo_path: None,
            printer_name: String::new(),
            currency: "$".to_string(),
            page_width: DEFAULT_PAGE_WIDTH,
            enable_cash_drawer: true,
        }
    }
}

/// Keys of the flat profile file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKey {
    StoreName,
    Address,
    Phone,
    Email,
    LogoPath,
    PrinterName,
    EnableCashDrawer,
    Currency,
    PageWidth,
}

impl ProfileKey {
    /// Every key, in file order.
    pub const ALL: [ProfileKey; 9] = [
        ProfileKey::StoreName,
        ProfileKey::Address,
        ProfileKey::Phone,
        ProfileKey::Email,
        ProfileKey::LogoPath,
        ProfileKey::PrinterName,
        ProfileKey::EnableCashDrawer,
        ProfileKey::Currency,
        ProfileKey::PageWidth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileKey::StoreName => "StoreName",
            ProfileKey::Address => "Address",
            ProfileKey::Phone => "Phone",
            ProfileKey::Email => "Email",
            ProfileKey::LogoPath => "LogoPath",
            ProfileKey::PrinterName => "PrinterName",
            ProfileKey::EnableCashDrawer => "EnableCashDrawer",
            ProfileKey::Currency => "Currency",
            ProfileKey::PageWidth => "PageWidth",
        }
    }

    /// Parse a key, ignoring case, `_` and `-` (`store_name`, `storeName`
    /// and `StoreName` are the same key).
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();

        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(&normalized))
    }
}

impl fmt::Display for ProfileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A partial profile update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub logo_path: Option<String>,
    pub printer_name: Option<String>,
    pub currency: Option<String>,
    pub page_width: Option<f32>,
    pub enable_cash_drawer: Option<bool>,
}

impl StoreProfile {
    /// Profile written when no profile file exists yet.
    pub fn starter() -> Self {
        Self {
            name: "Your Store Name".to_string(),
            address: "123 Main St, City, State 12345".to_string(),
            phone: "(555) 123-4567".to_string(),
            email: "info@yourstore.com".to_string(),
            ..Self::default()
        }
    }

    /// Read a profile from `key=value` text.
    ///
    /// Unknown keys and lines without `=` are skipped. A value that does not
    /// parse keeps the default for its key.
    pub fn from_kv_str(text: &str) -> Self {
        let mut profile = Self::default();

        for (line_no, line) in text.lines().enumerate() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let Some(key) = ProfileKey::parse(key) else {
                debug!(line = line_no + 1, key = key.trim(), "skipping unknown profile key");
                continue;
            };
            if let Err(e) = profile.set_key(key, value) {
                warn!(line = line_no + 1, "keeping default: {}", e);
            }
        }

        profile
    }

    /// Serialize to `key=value` text, one setting per line.
    pub fn to_kv_string(&self) -> String {
        let mut out = String::new();
        for key in ProfileKey::ALL {
            out.push_str(key.as_str());
            out.push('=');
            out.push_str(&self.get_key(key));
            out.push('\n');
        }
        out
    }

    /// Load a profile file.
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_kv_str(&content))
    }

    /// Save the profile, replacing the file.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        fs::write(path, self.to_kv_string())
    }

    /// Load a profile file, writing the starter profile first when the file
    /// does not exist yet.
    pub fn load_or_init(path: &Path) -> std::io::Result<Self> {
        if path.exists() {
            return Self::load(path);
        }

        let profile = Self::starter();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        profile.save(path)?;
        debug!(path = %path.display(), "wrote starter profile");
        Ok(profile)
    }

    /// Current value of a setting, as written to the profile file.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let key = ProfileKey::parse(key).ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        Ok(self.get_key(key))
    }

    /// Change one setting from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let key = ProfileKey::parse(key).ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        self.set_key(key, value)
    }

    pub fn get_key(&self, key: ProfileKey) -> String {
        match key {
            ProfileKey::StoreName => self.name.clone(),
            ProfileKey::Address => self.address.clone(),
            ProfileKey::Phone => self.phone.clone(),
            ProfileKey::Email => self.email.clone(),
            ProfileKey::LogoPath => self
                .logo_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            ProfileKey::PrinterName => self.printer_name.clone(),
            ProfileKey::EnableCashDrawer => self.enable_cash_drawer.to_string(),
            ProfileKey::Currency => self.currency.clone(),
            ProfileKey::PageWidth => self.page_width.to_string(),
        }
    }

    /// Change one setting from its textual form.
    ///
    /// Values spanning more than one line are rejected; the profile file
    /// holds one setting per line.
    pub fn set_key(&mut self, key: ProfileKey, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        if value.contains(['\n', '\r']) {
            return Err(invalid());
        }

        match key {
            ProfileKey::StoreName => self.name = value.to_string(),
            ProfileKey::Address => self.address = value.to_string(),
            ProfileKey::Phone => self.phone = value.to_string(),
            ProfileKey::Email => self.email = value.to_string(),
            ProfileKey::LogoPath => {
                self.logo_path = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            ProfileKey::PrinterName => self.printer_name = value.to_string(),
            ProfileKey::EnableCashDrawer => {
                self.enable_cash_drawer = crate::extract::parse_bool(value).ok_or_else(invalid)?;
            }
            ProfileKey::Currency => self.currency = value.to_string(),
            ProfileKey::PageWidth => {
                let width: f32 = value.parse().map_err(|_| invalid())?;
                if !width.is_finite() || width <= 0.0 {
                    return Err(invalid());
                }
                self.page_width = width;
            }
        }
        Ok(())
    }

    /// Apply the fields present in `update`.
    ///
    /// Each field is checked like [`StoreProfile::set_key`]; on the first
    /// invalid value nothing is changed.
    pub fn apply(&mut self, update: ProfileUpdate) -> Result<(), ConfigError> {
        let changes = [
            (ProfileKey::StoreName, update.name),
            (ProfileKey::Address, update.address),
            (ProfileKey::Phone, update.phone),
            (ProfileKey::Email, update.email),
            (ProfileKey::LogoPath, update.logo_path),
            (ProfileKey::PrinterName, update.printer_name),
            (ProfileKey::Currency, update.currency),
            (ProfileKey::PageWidth, update.page_width.map(|w| w.to_string())),
            (
                ProfileKey::EnableCashDrawer,
                update.enable_cash_drawer.map(|b| b.to_string()),
            ),
        ];

        let mut updated = self.clone();
        for (key, value) in changes {
            if let Some(value) = value {
                updated.set_key(key, &value)?;
            }
        }
        *self = updated;
        Ok(())
    }
}

/// Source of the store profile for a print request.
pub trait ProfileProvider {
    fn current_profile(&self) -> StoreProfile;
}

impl ProfileProvider for StoreProfile {
    fn current_profile(&self) -> StoreProfile {
        self.clone()
    }
}

/// Reads the profile file on every request, so edits apply to the next
/// receipt without a restart.
#[derive(Debug, Clone)]
pub struct FileProfileProvider {
    path: PathBuf,
}

impl FileProfileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProfileProvider for FileProfileProvider {
    fn current_profile(&self) -> StoreProfile {
        StoreProfile::load(&self.path).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), "using default profile: {}", e);
            StoreProfile::default()
        })
    }
}
