//! Company branding and host directory.
//!
//! The company configuration is an immutable value built once at startup
//! and shared by `Arc` with whatever needs it. Nothing here reads global
//! state.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A staff member visitors can register to see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    pub id: String,
    pub name: String,
    pub title: String,
    pub email: String,
}

/// Fixed list of hosts, looked up by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostDirectory {
    hosts: Vec<Host>,
}

impl HostDirectory {
    pub fn new(hosts: Vec<Host>) -> Self {
        Self { hosts }
    }

    /// Find a host by id.
    pub fn lookup(&self, host_id: &str) -> Option<&Host> {
        self.hosts.iter().find(|h| h.id == host_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Host> {
        self.hosts.iter()
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}

/// Brand palette used by the email templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub surface: String,
}

/// Public contact details for the company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Branding plus the host directory for one deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyConfig {
    pub name: String,

    /// Logo URL or path embedded in emails
    pub logo: String,

    pub colors: BrandColors,
    pub hosts: HostDirectory,
    pub contact: ContactInfo,
}

impl CompanyConfig {
    /// Load a company configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::FileError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config: CompanyConfig =
            serde_json::from_str(&raw).map_err(|e| ConfigError::FileError {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        if config.hosts.is_empty() {
            return Err(ConfigError::FileError {
                path: path.display().to_string(),
                reason: "at least one host is required".to_string(),
            });
        }

        Ok(config)
    }

    /// Find a host by id.
    pub fn lookup_host(&self, host_id: &str) -> Option<&Host> {
        self.hosts.lookup(host_id)
    }
}

fn host(id: &str, name: &str, title: &str, email: &str) -> Host {
    Host {
        id: id.to_string(),
        name: name.to_string(),
        title: title.to_string(),
        email: email.to_string(),
    }
}

impl Default for CompanyConfig {
    fn default() -> Self {
        CompanyConfig {
            name: "Smoothtel".to_string(),
            logo: "/smoothtel_logo.png".to_string(),
            colors: BrandColors {
                primary: "#2563eb".to_string(),
                secondary: "#f97316".to_string(),
                accent: "#059669".to_string(),
                background: "#f8fafc".to_string(),
                surface: "#ffffff".to_string(),
            },
            hosts: HostDirectory::new(vec![
                host(
                    "raphael-mwangi",
                    "Raphael Mwangi",
                    "Chief Executive Officer",
                    "raphael.mwangi@smoothtel.com",
                ),
                host(
                    "purity-mwende",
                    "Purity Mwende",
                    "Chief Operations Officer",
                    "purity.mwende@smoothtel.com",
                ),
                host(
                    "edward-koikai",
                    "Edward Koikai",
                    "Software Engineer",
                    "edward.koikai@smoothtel.com",
                ),
                host(
                    "joan-lusweti",
                    "Joan Lusweti",
                    "Sales Admin Team Lead",
                    "joan.lusweti@smoothtel.com",
                ),
                host(
                    "sarah-bosibori",
                    "Sarah Bosibori",
                    "Human Resource Officer",
                    "sarah.bosibori@smoothtel.com",
                ),
            ]),
            contact: ContactInfo {
                email: "info@smoothtel.com".to_string(),
                phone: "+254 700 000 000".to_string(),
                address: "Nairobi, Kenya".to_string(),
            },
        }
    }
}
