//! Fixtures

use std::{fs, path::PathBuf};

use rusty_money::{Money, iso};
use serde::Deserialize;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError, Color, Length, Variant, VariantId, original_price_for},
    packs::{PackError, PackOption, PackOptions},
};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Unknown color slug or label
    #[error("unknown color: {0}")]
    UnknownColor(String),

    /// Unknown length label
    #[error("unknown length: {0}")]
    UnknownLength(String),

    /// Catalog invariant violated by fixture data
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Pack tier invariant violated by fixture data
    #[error(transparent)]
    Packs(#[from] PackError),

    /// No catalog loaded yet
    #[error("no catalog loaded; call load_catalog first")]
    NoCatalog,

    /// No pack tiers loaded yet
    #[error("no pack tiers loaded; call load_packs first")]
    NoPacks,
}

/// Wrapper for catalog variants in YAML
#[derive(Debug, Deserialize)]
struct CatalogFixture {
    /// ISO currency code shared by every price in the file
    currency: String,

    /// Variant rows, in catalog order
    variants: Vec<VariantFixture>,
}

/// One catalog variant row from YAML
#[derive(Debug, Deserialize)]
struct VariantFixture {
    color: String,
    length: String,
    price: String,

    /// Omitted rows fall back to the fixed markup rule.
    #[serde(default)]
    original_price: Option<String>,

    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    rating: f32,

    #[serde(default)]
    reviews: u32,

    images: Vec<String>,

    #[serde(default)]
    description: String,

    #[serde(default)]
    popular: bool,
}

/// Wrapper for pack tiers in YAML
#[derive(Debug, Deserialize)]
struct PacksFixture {
    /// ISO currency code shared by every discount in the file
    currency: String,

    /// Tier rows, smallest bundle first
    tiers: Vec<TierFixture>,
}

/// One pack tier row from YAML
#[derive(Debug, Deserialize)]
struct TierFixture {
    count: u32,
    discount: String,
}

/// Loads catalog and pack-tier fixture sets from YAML files under a
/// base directory, for integration tests and demo binaries.
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    catalog: Option<Catalog<'static>>,
    packs: Option<PackOptions<'static>>,
}

impl Fixture {
    /// Create a new empty fixture with the default base path.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with a custom base path.
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalog: None,
            packs: None,
        }
    }

    /// Load a catalog from a YAML fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, names an
    /// unknown color, length or currency, or violates a catalog
    /// invariant.
    pub fn load_catalog(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("catalog").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CatalogFixture = serde_norway::from_str(&contents)?;

        let currency = iso::find(&fixture.currency)
            .ok_or_else(|| FixtureError::UnknownCurrency(fixture.currency.clone()))?;

        let variants = fixture
            .variants
            .into_iter()
            .map(|row| build_variant(row, currency))
            .collect::<Result<Vec<_>, _>>()?;

        self.catalog = Some(Catalog::new(variants)?);

        Ok(self)
    }

    /// Load pack tiers from a YAML fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, names an
    /// unknown currency, or violates a tier-set invariant.
    pub fn load_packs(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("packs").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: PacksFixture = serde_norway::from_str(&contents)?;

        let currency = iso::find(&fixture.currency)
            .ok_or_else(|| FixtureError::UnknownCurrency(fixture.currency.clone()))?;

        let tiers = fixture
            .tiers
            .into_iter()
            .map(|row| {
                Ok(PackOption::new(
                    row.count,
                    parse_price(&row.discount, currency)?,
                ))
            })
            .collect::<Result<Vec<_>, FixtureError>>()?;

        self.packs = Some(PackOptions::new(tiers)?);

        Ok(self)
    }

    /// Load the catalog and pack fixture files sharing one set name.
    ///
    /// # Errors
    ///
    /// Returns an error if either fixture file cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_catalog(name)?.load_packs(name)?;

        Ok(fixture)
    }

    /// The loaded catalog.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::NoCatalog`] before `load_catalog`.
    pub fn catalog(&self) -> Result<&Catalog<'static>, FixtureError> {
        self.catalog.as_ref().ok_or(FixtureError::NoCatalog)
    }

    /// The loaded pack tiers.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::NoPacks`] before `load_packs`.
    pub fn packs(&self) -> Result<&PackOptions<'static>, FixtureError> {
        self.packs.as_ref().ok_or(FixtureError::NoPacks)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a fixture price string like `55.00` for the file's currency.
fn parse_price(
    value: &str,
    currency: &'static iso::Currency,
) -> Result<Money<'static, iso::Currency>, FixtureError> {
    Money::from_str(value.trim().trim_start_matches('$'), currency)
        .map_err(|_err| FixtureError::InvalidPrice(value.to_owned()))
}

fn build_variant(
    row: VariantFixture,
    currency: &'static iso::Currency,
) -> Result<Variant<'static>, FixtureError> {
    let color =
        Color::parse(&row.color).ok_or_else(|| FixtureError::UnknownColor(row.color.clone()))?;

    let length =
        Length::parse(&row.length).ok_or_else(|| FixtureError::UnknownLength(row.length.clone()))?;

    let price = parse_price(&row.price, currency)?;

    let original_price = match row.original_price {
        Some(original) => parse_price(&original, currency)?,
        None => original_price_for(price),
    };

    let images: SmallVec<[String; 3]> = row.images.into_iter().collect();

    Ok(Variant {
        id: VariantId::for_selection(color, length),
        name: row
            .name
            .unwrap_or_else(|| format!("{} Afro Kinky Bulk Hair", color.label())),
        color,
        length,
        price,
        original_price,
        rating: row.rating,
        reviews: row.reviews,
        images,
        description: row.description,
        weight: "100g".to_owned(),
        texture: "Afro Kinky".to_owned(),
        features: Vec::new(),
        popular: row.popular,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rusty_money::iso::USD;
    use testresult::TestResult;

    use super::*;

    fn write_set(dir: &std::path::Path, name: &str, catalog: &str, packs: &str) -> TestResult {
        fs::create_dir_all(dir.join("catalog"))?;
        fs::create_dir_all(dir.join("packs"))?;
        fs::write(dir.join("catalog").join(format!("{name}.yml")), catalog)?;
        fs::write(dir.join("packs").join(format!("{name}.yml")), packs)?;

        Ok(())
    }

    const CATALOG_YML: &str = "\
currency: USD
variants:
  - color: natural-black
    length: 18\"
    price: \"55.00\"
    original_price: \"75.00\"
    rating: 4.9
    reviews: 156
    images:
      - /IMG-20250629-WA0200.jpg
  - color: dark-brown
    length: 14\"
    price: \"48.00\"
    images:
      - /twists.webp
";

    const PACKS_YML: &str = "\
currency: USD
tiers:
  - count: 1
    discount: \"0.00\"
  - count: 2
    discount: \"5.00\"
";

    #[test]
    fn loads_a_set_from_yaml() -> TestResult {
        let dir = tempfile::tempdir()?;
        write_set(dir.path(), "mini", CATALOG_YML, PACKS_YML)?;

        let mut fixture = Fixture::with_base_path(dir.path());
        fixture.load_catalog("mini")?.load_packs("mini")?;

        let catalog = fixture.catalog()?;
        assert_eq!(catalog.len(), 2);

        let variant = catalog
            .get(Color::NaturalBlack, Length::In18)
            .ok_or("missing fixture variant")?;
        assert_eq!(variant.price, Money::from_minor(5500, USD));
        assert_eq!(variant.original_price, Money::from_minor(7500, USD));

        let packs = fixture.packs()?;
        assert_eq!(packs.tier(2).discount(), Money::from_minor(500, USD));

        Ok(())
    }

    #[test]
    fn omitted_original_price_uses_the_markup_rule() -> TestResult {
        let dir = tempfile::tempdir()?;
        write_set(dir.path(), "mini", CATALOG_YML, PACKS_YML)?;

        let mut fixture = Fixture::with_base_path(dir.path());
        fixture.load_catalog("mini")?;

        let variant = fixture
            .catalog()?
            .get(Color::DarkBrown, Length::In14)
            .ok_or("missing fixture variant")?;

        assert_eq!(variant.original_price, Money::from_minor(6800, USD));

        Ok(())
    }

    #[test]
    fn unknown_color_fails_loudly() -> TestResult {
        let dir = tempfile::tempdir()?;
        let catalog = CATALOG_YML.replace("natural-black", "chestnut");
        write_set(dir.path(), "mini", &catalog, PACKS_YML)?;

        let mut fixture = Fixture::with_base_path(dir.path());
        let result = fixture.load_catalog("mini");

        assert!(matches!(result, Err(FixtureError::UnknownColor(_))));

        Ok(())
    }

    #[test]
    fn unknown_currency_fails_loudly() -> TestResult {
        let dir = tempfile::tempdir()?;
        let catalog = CATALOG_YML.replace("currency: USD", "currency: ZZZ");
        write_set(dir.path(), "mini", &catalog, PACKS_YML)?;

        let mut fixture = Fixture::with_base_path(dir.path());
        let result = fixture.load_catalog("mini");

        assert!(matches!(result, Err(FixtureError::UnknownCurrency(_))));

        Ok(())
    }

    #[test]
    fn accessors_error_before_loading() {
        let fixture = Fixture::new();

        assert!(matches!(fixture.catalog(), Err(FixtureError::NoCatalog)));
        assert!(matches!(fixture.packs(), Err(FixtureError::NoPacks)));
    }

    #[test]
    fn shipped_fixture_set_loads() -> TestResult {
        let fixture = Fixture::from_set("mini")?;

        assert!(fixture.catalog()?.len() >= 2);
        assert_eq!(fixture.packs()?.tiers().len(), 4);

        Ok(())
    }

    #[test]
    fn dollar_prefixed_prices_parse() -> TestResult {
        let price = parse_price("$12.50", USD)?;

        assert_eq!(price, Money::from_minor(1250, USD));

        Ok(())
    }
}
