use anyhow::{Context, Result};
use koala_ingest::{Bank, C6Extractor, ExtractorRegistry, NubankExtractor, StatementExtractor};
use serde::{Deserialize, Serialize};
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub log: LogSection,
    #[serde(default)]
    pub banks: BanksSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogSection {
    /// tracing filter used when RUST_LOG is unset (e.g. "warn", "koala_ingest=debug")
    pub level: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BanksSection {
    #[serde(default = "c6_defaults")]
    pub c6: BankSection,
    #[serde(default = "nubank_defaults")]
    pub nubank: BankSection,
}

impl Default for BanksSection {
    fn default() -> Self {
        Self {
            c6: c6_defaults(),
            nubank: nubank_defaults(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankSection {
    /// Zero-based index of the first page with transactions
    pub start_page: usize,
    /// Year attached to `DD MON` rows (default: current year)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement_year: Option<i32>,
}

fn c6_defaults() -> BankSection {
    BankSection {
        start_page: Bank::C6.default_start_page(),
        statement_year: None,
    }
}

fn nubank_defaults() -> BankSection {
    BankSection {
        start_page: Bank::Nubank.default_start_page(),
        statement_year: None,
    }
}

impl Config {
    pub fn bank(&self, bank: Bank) -> &BankSection {
        match bank {
            Bank::C6 => &self.banks.c6,
            Bank::Nubank => &self.banks.nubank,
        }
    }

    /// Extractor for `bank`, with per-run overrides taking precedence over the file.
    pub fn extractor_for(
        &self,
        bank: Bank,
        start_page: Option<usize>,
        year: Option<i32>,
    ) -> Box<dyn StatementExtractor> {
        let section = self.bank(bank);
        let start_page = start_page.unwrap_or(section.start_page);
        let year = year.or(section.statement_year);

        match bank {
            Bank::C6 => {
                let mut e = C6Extractor::new().with_start_page(start_page);
                if let Some(y) = year {
                    e = e.with_year(y);
                }
                Box::new(e)
            }
            Bank::Nubank => {
                let mut e = NubankExtractor::new().with_start_page(start_page);
                if let Some(y) = year {
                    e = e.with_year(y);
                }
                Box::new(e)
            }
        }
    }

    pub fn registry(&self) -> ExtractorRegistry {
        let mut registry = ExtractorRegistry::new();
        for bank in Bank::ALL {
            registry.add(self.extractor_for(bank, None, None));
        }
        registry
    }
}

/// `$KOALA_HOME`, else `$HOME/.koala`.
fn koala_dir(koala_home: Option<OsString>, home: Option<OsString>) -> Result<PathBuf> {
    if let Some(dir) = koala_home.filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = home.context("neither KOALA_HOME nor HOME is set")?;
    Ok(PathBuf::from(home).join(".koala"))
}

/// Default config location. Creates the koala directory on first use.
pub fn config_path() -> Result<PathBuf> {
    let dir = koala_dir(env::var_os("KOALA_HOME"), env::var_os("HOME"))?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir.join("config.toml"))
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(cfg: &Config, p: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config(p: &Path) -> Result<()> {
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&Config::default(), p)?;
    println!("Wrote {}", p.display());
    Ok(())
}
