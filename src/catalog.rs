//! Catalog

use std::fmt;

use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use smallvec::SmallVec;
use thiserror::Error;

/// Markup, in minor units, between a length's base price and the
/// strike-through "original" price shown against it.
pub const ORIGINAL_PRICE_MARKUP: i64 = 2000;

/// The strike-through price implied by the fixed markup over a base
/// price. Catalog entries store their original price explicitly; this
/// rule covers synthesized variants and fixture rows that omit one.
#[must_use]
pub fn original_price_for<'a>(price: Money<'a, Currency>) -> Money<'a, Currency> {
    Money::from_minor(price.to_minor_units() + ORIGINAL_PRICE_MARKUP, price.currency())
}

/// Available hair colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Color {
    /// Natural black (`#1B1B1B`)
    #[default]
    NaturalBlack,

    /// Dark brown (`#3C2415`)
    DarkBrown,

    /// Medium brown (`#8B4513`)
    MediumBrown,
}

impl Color {
    /// All colors, in display order.
    pub const ALL: [Color; 3] = [Color::NaturalBlack, Color::DarkBrown, Color::MediumBrown];

    /// Display label, e.g. `Natural Black`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Color::NaturalBlack => "Natural Black",
            Color::DarkBrown => "Dark Brown",
            Color::MediumBrown => "Medium Brown",
        }
    }

    /// URL/id slug, e.g. `natural-black`.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Color::NaturalBlack => "natural-black",
            Color::DarkBrown => "dark-brown",
            Color::MediumBrown => "medium-brown",
        }
    }

    /// Hex swatch code used for the color picker.
    #[must_use]
    pub fn swatch(self) -> &'static str {
        match self {
            Color::NaturalBlack => "#1B1B1B",
            Color::DarkBrown => "#3C2415",
            Color::MediumBrown => "#8B4513",
        }
    }

    /// Parse a label or slug, case-insensitively.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let slug = input.trim().to_lowercase().replace(' ', "-");

        Color::ALL.into_iter().find(|color| color.slug() == slug)
    }

    /// Parse a label or slug, falling back to [`Color::NaturalBlack`]
    /// for anything unrecognized.
    #[must_use]
    pub fn from_input(input: &str) -> Self {
        Color::parse(input).unwrap_or_default()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Available lengths, in inches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Length {
    /// 10 inches
    In10,
    /// 12 inches
    In12,
    /// 14 inches
    In14,
    /// 16 inches
    In16,
    /// 18 inches
    #[default]
    In18,
    /// 20 inches
    In20,
    /// 22 inches
    In22,
    /// 24 inches
    In24,
}

impl Length {
    /// All lengths, shortest first.
    pub const ALL: [Length; 8] = [
        Length::In10,
        Length::In12,
        Length::In14,
        Length::In16,
        Length::In18,
        Length::In20,
        Length::In22,
        Length::In24,
    ];

    /// Length in inches.
    #[must_use]
    pub fn inches(self) -> u8 {
        match self {
            Length::In10 => 10,
            Length::In12 => 12,
            Length::In14 => 14,
            Length::In16 => 16,
            Length::In18 => 18,
            Length::In20 => 20,
            Length::In22 => 22,
            Length::In24 => 24,
        }
    }

    /// Display label, e.g. `14"`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Length::In10 => "10\"",
            Length::In12 => "12\"",
            Length::In14 => "14\"",
            Length::In16 => "16\"",
            Length::In18 => "18\"",
            Length::In20 => "20\"",
            Length::In22 => "22\"",
            Length::In24 => "24\"",
        }
    }

    /// Base price for this length. Every length is priced here, including
    /// the short lengths the shipped catalog carries no entry for, so a
    /// synthesized variant always has a price of its own.
    #[must_use]
    pub fn base_price(self) -> Money<'static, Currency> {
        let minor = match self {
            Length::In10 => 4000,
            Length::In12 => 4200,
            Length::In14 => 4500,
            Length::In16 => 5000,
            Length::In18 => 5500,
            Length::In20 => 6000,
            Length::In22 => 6500,
            Length::In24 => 7000,
        };

        Money::from_minor(minor, iso::USD)
    }

    /// Parse a label (`14"`) or bare inch count (`14`).
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let digits = input.trim().trim_end_matches('"');

        Length::ALL
            .into_iter()
            .find(|length| length.inches().to_string() == digits)
    }

    /// Parse a label or inch count, falling back to [`Length::In18`] for
    /// anything unrecognized.
    #[must_use]
    pub fn from_input(input: &str) -> Self {
        Length::parse(input).unwrap_or_default()
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stable variant identifier, derived from the (color, length) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariantId(String);

impl VariantId {
    /// Derive the id for a (color, length) selection.
    #[must_use]
    pub fn for_selection(color: Color, length: Length) -> Self {
        VariantId(format!("afro-kinky-{}-{}", color.slug(), length.inches()))
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One purchasable SKU: a (color, length) combination with its pricing
/// and display metadata.
#[derive(Debug, Clone)]
pub struct Variant<'a> {
    /// Stable identifier, always the slug for (color, length).
    pub id: VariantId,

    /// Display name.
    pub name: String,

    /// Hair color.
    pub color: Color,

    /// Hair length.
    pub length: Length,

    /// Current selling price per single pack.
    pub price: Money<'a, Currency>,

    /// Strike-through price the percent-off badge is computed against.
    /// Stored explicitly; never derived for catalog entries.
    pub original_price: Money<'a, Currency>,

    /// Average review rating.
    pub rating: f32,

    /// Number of reviews behind the rating.
    pub reviews: u32,

    /// Ordered image references; the first is the default display image.
    pub images: SmallVec<[String; 3]>,

    /// Long-form description.
    pub description: String,

    /// Pack weight label.
    pub weight: String,

    /// Texture label.
    pub texture: String,

    /// Bullet-point feature list.
    pub features: Vec<String>,

    /// Whether the variant is surfaced in "popular" sections.
    pub popular: bool,
}

/// Errors raised while assembling a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog would contain no variants at all.
    #[error("catalog has no variants")]
    Empty,

    /// Two variants share a (color, length) pair.
    #[error("duplicate variant for {0} {1}")]
    DuplicateVariant(Color, Length),

    /// A variant has an empty image list.
    #[error("variant {0} has no images")]
    NoImages(VariantId),

    /// A variant's selling price exceeds its original price.
    #[error("variant {0} is priced above its original price")]
    PriceAboveOriginal(VariantId),

    /// A variant's currency differs from the catalog currency.
    #[error("variant {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(VariantId, &'static str, &'static str),
}

/// Read-only variant catalog, injected into the resolver and any
/// browsing surface rather than living as module state.
#[derive(Debug)]
pub struct Catalog<'a> {
    variants: Vec<Variant<'a>>,
    by_pair: FxHashMap<(Color, Length), usize>,
    by_id: FxHashMap<String, usize>,
    currency: &'a Currency,
}

impl<'a> Catalog<'a> {
    /// Build a catalog from a list of variants, validating identity and
    /// pricing invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the list is empty, contains a
    /// duplicate (color, length) pair, mixes currencies, or holds a
    /// variant with no images or a price above its original price.
    pub fn new(variants: Vec<Variant<'a>>) -> Result<Self, CatalogError> {
        let first = variants.first().ok_or(CatalogError::Empty)?;
        let currency = first.price.currency();

        let mut by_pair = FxHashMap::default();
        let mut by_id = FxHashMap::default();

        for (index, variant) in variants.iter().enumerate() {
            if variant.images.is_empty() {
                return Err(CatalogError::NoImages(variant.id.clone()));
            }

            if variant.price.currency() != currency
                || variant.original_price.currency() != currency
            {
                return Err(CatalogError::CurrencyMismatch(
                    variant.id.clone(),
                    variant.price.currency().iso_alpha_code,
                    currency.iso_alpha_code,
                ));
            }

            if variant.original_price.to_minor_units() < variant.price.to_minor_units() {
                return Err(CatalogError::PriceAboveOriginal(variant.id.clone()));
            }

            let pair = (variant.color, variant.length);
            if by_pair.insert(pair, index).is_some() {
                return Err(CatalogError::DuplicateVariant(variant.color, variant.length));
            }

            by_id.insert(variant.id.as_str().to_owned(), index);
        }

        Ok(Catalog {
            variants,
            by_pair,
            by_id,
            currency,
        })
    }

    /// The catalog shipped with the storefront: three colors across the
    /// 14"–24" lengths.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the shipped data set violates a
    /// catalog invariant.
    pub fn standard() -> Result<Catalog<'static>, CatalogError> {
        Catalog::new(standard_variants())
    }

    /// Look up the exact variant for a (color, length) pair.
    #[must_use]
    pub fn get(&self, color: Color, length: Length) -> Option<&Variant<'a>> {
        self.by_pair
            .get(&(color, length))
            .and_then(|index| self.variants.get(*index))
    }

    /// Look up a variant by its id slug.
    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<&Variant<'a>> {
        self.by_id.get(id).and_then(|index| self.variants.get(*index))
    }

    /// All variants, in catalog order.
    #[must_use]
    pub fn variants(&self) -> &[Variant<'a>] {
        &self.variants
    }

    /// Variants of one color, in catalog (shortest-first) order.
    pub fn by_color(&self, color: Color) -> impl Iterator<Item = &Variant<'a>> {
        self.variants
            .iter()
            .filter(move |variant| variant.color == color)
    }

    /// Number of variants in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Whether the catalog is empty. Construction rejects empty
    /// catalogs, so this is only ever false.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Currency shared by every variant.
    #[must_use]
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }
}

struct Seed {
    length: Length,
    price: i64,
    original: i64,
    rating: f32,
    reviews: u32,
    popular: bool,
    images: [&'static str; 3],
}

fn seeded_variant(
    color: Color,
    seed: &Seed,
    description: &str,
    color_feature: &str,
) -> Variant<'static> {
    let features = [
        "100% Premium Human Hair",
        color_feature,
        "Perfect for Braiding & Dreadlocks",
        "Heat Resistant up to 350°F",
        "Chemical Free Processing",
        "Long Lasting Durability",
        "Tangle Free",
        "Natural Movement",
    ];

    Variant {
        id: VariantId::for_selection(color, seed.length),
        name: format!("{} Afro Kinky Bulk Hair", color.label()),
        color,
        length: seed.length,
        price: Money::from_minor(seed.price, iso::USD),
        original_price: Money::from_minor(seed.original, iso::USD),
        rating: seed.rating,
        reviews: seed.reviews,
        images: seed.images.iter().map(|image| (*image).to_owned()).collect(),
        description: description.to_owned(),
        weight: "100g".to_owned(),
        texture: "Afro Kinky".to_owned(),
        features: features.iter().map(|feature| (*feature).to_owned()).collect(),
        popular: seed.popular,
    }
}

#[rustfmt::skip]
fn standard_variants() -> Vec<Variant<'static>> {
    let natural_black = [
        Seed { length: Length::In14, price: 4500, original: 6500, rating: 4.9, reviews: 234, popular: true,  images: ["/IMG-20250629-WA0197.jpg", "/IMG-20250629-WA0183.jpg", "/IMG-20250629-WA0168.jpg"] },
        Seed { length: Length::In16, price: 5000, original: 7000, rating: 4.8, reviews: 189, popular: true,  images: ["/IMG-20250629-WA0183.jpg", "/IMG-20250629-WA0197.jpg", "/IMG-20250629-WA0200.jpg"] },
        Seed { length: Length::In18, price: 5500, original: 7500, rating: 4.9, reviews: 156, popular: false, images: ["/IMG-20250629-WA0200.jpg", "/IMG-20250629-WA0197.jpg", "/IMG-20250629-WA0183.jpg"] },
        Seed { length: Length::In20, price: 6000, original: 8000, rating: 4.7, reviews: 143, popular: false, images: ["/IMG-20250629-WA0168.jpg", "/IMG-20250629-WA0180.jpg", "/IMG-20250629-WA0185.jpg"] },
        Seed { length: Length::In22, price: 6500, original: 8500, rating: 4.8, reviews: 98,  popular: false, images: ["/IMG-20250629-WA0180.jpg", "/IMG-20250629-WA0168.jpg", "/IMG-20250629-WA0185.jpg"] },
        Seed { length: Length::In24, price: 7000, original: 9000, rating: 4.6, reviews: 87,  popular: false, images: ["/IMG-20250629-WA0185.jpg", "/IMG-20250629-WA0180.jpg", "/IMG-20250629-WA0189.jpg"] },
    ];

    let dark_brown = [
        Seed { length: Length::In14, price: 4800, original: 6800, rating: 4.8, reviews: 167, popular: true,  images: ["/twists.webp", "/dark_brown_afro_kinky_bulk_human_hair_for_dreadlocks_black_women.webp", "/styles.webp"] },
        Seed { length: Length::In16, price: 5300, original: 7300, rating: 4.7, reviews: 134, popular: false, images: ["/IMG-20250629-WA0189.jpg", "/IMG-20250629-WA0193.jpg", "/IMG-20250702-WA0002.jpg"] },
        Seed { length: Length::In18, price: 5800, original: 7800, rating: 4.9, reviews: 112, popular: false, images: ["/IMG-20250702-WA0001.jpg", "/IMG-20250702-WA0002.jpg", "/IMG-20250702-WA0003.jpg"] },
        Seed { length: Length::In20, price: 6300, original: 8300, rating: 4.6, reviews: 89,  popular: false, images: ["/IMG-20250702-WA0002.jpg", "/IMG-20250702-WA0003.jpg", "/IMG-20250702-WA0004.jpg"] },
        Seed { length: Length::In22, price: 6800, original: 8800, rating: 4.8, reviews: 76,  popular: false, images: ["/IMG-20250702-WA0003.jpg", "/IMG-20250702-WA0004.jpg", "/IMG-20250702-WA0005.jpg"] },
        Seed { length: Length::In24, price: 7300, original: 9300, rating: 4.7, reviews: 65,  popular: false, images: ["/IMG-20250702-WA0004.jpg", "/IMG-20250702-WA0005.jpg", "/IMG-20250702-WA0006.jpg"] },
    ];

    let medium_brown = [
        Seed { length: Length::In14, price: 5200, original: 7200, rating: 4.7, reviews: 145, popular: false, images: ["/IMG-20250702-WA0005.jpg", "/IMG-20250702-WA0006.jpg", "/WhatsApp Image 2025-06-29 at 14.09.11_581cec0e.jpg"] },
        Seed { length: Length::In16, price: 5700, original: 7700, rating: 4.8, reviews: 123, popular: false, images: ["/IMG-20250702-WA0006.jpg", "/IMG-20250702-WA0005.jpg", "/WhatsApp Image 2025-06-29 at 14.09.11_581cec0e.jpg"] },
        Seed { length: Length::In18, price: 6200, original: 8200, rating: 4.6, reviews: 98,  popular: false, images: ["/WhatsApp Image 2025-06-29 at 14.09.11_581cec0e.jpg", "/IMG-20250629-WA0170.jpg", "/IMG-20250629-WA0197.jpg"] },
        Seed { length: Length::In20, price: 6700, original: 8700, rating: 4.9, reviews: 87,  popular: false, images: ["/IMG-20250629-WA0170.jpg", "/IMG-20250629-WA0197.jpg", "/IMG-20250629-WA0183.jpg"] },
        Seed { length: Length::In22, price: 7200, original: 9200, rating: 4.5, reviews: 74,  popular: false, images: ["/IMG-20250629-WA0197.jpg", "/IMG-20250629-WA0183.jpg", "/IMG-20250629-WA0200.jpg"] },
        Seed { length: Length::In24, price: 7700, original: 9700, rating: 4.7, reviews: 62,  popular: false, images: ["/IMG-20250629-WA0183.jpg", "/IMG-20250629-WA0197.jpg", "/IMG-20250629-WA0200.jpg"] },
    ];

    let sections = [
        (
            Color::NaturalBlack,
            natural_black.as_slice(),
            "Premium quality natural black afro kinky bulk hair perfect for braiding and protective styling. Made from 100% human hair with natural texture that blends seamlessly with your natural hair.",
            "Natural Afro Kinky Texture",
        ),
        (
            Color::DarkBrown,
            dark_brown.as_slice(),
            "Premium quality dark brown afro kinky bulk hair perfect for braiding and protective styling. Made from 100% human hair with rich brown color that complements various skin tones.",
            "Rich Dark Brown Color",
        ),
        (
            Color::MediumBrown,
            medium_brown.as_slice(),
            "Premium quality medium brown afro kinky bulk hair perfect for braiding and protective styling. Made from 100% human hair with warm brown tones that enhance natural beauty.",
            "Warm Medium Brown Color",
        ),
    ];

    sections
        .into_iter()
        .flat_map(|(color, seeds, description, color_feature)| {
            seeds
                .iter()
                .map(move |seed| seeded_variant(color, seed, description, color_feature))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn standard_catalog_has_six_lengths_per_color() -> TestResult {
        let catalog = Catalog::standard()?;

        assert_eq!(catalog.len(), 18);

        for color in Color::ALL {
            assert_eq!(catalog.by_color(color).count(), 6);
        }

        Ok(())
    }

    #[test]
    fn standard_catalog_lookup_by_pair() -> TestResult {
        let catalog = Catalog::standard()?;

        let variant = catalog
            .get(Color::NaturalBlack, Length::In18)
            .ok_or("missing 18\" natural black")?;

        assert_eq!(variant.price, Money::from_minor(5500, iso::USD));
        assert_eq!(variant.original_price, Money::from_minor(7500, iso::USD));
        assert_eq!(variant.id.as_str(), "afro-kinky-natural-black-18");

        Ok(())
    }

    #[test]
    fn standard_catalog_lookup_by_id() -> TestResult {
        let catalog = Catalog::standard()?;

        let variant = catalog
            .by_id("afro-kinky-dark-brown-14")
            .ok_or("missing 14\" dark brown")?;

        assert_eq!(variant.color, Color::DarkBrown);
        assert_eq!(variant.length, Length::In14);
        assert_eq!(variant.price, Money::from_minor(4800, iso::USD));

        Ok(())
    }

    #[test]
    fn short_lengths_have_no_catalog_entry_but_a_base_price() -> TestResult {
        let catalog = Catalog::standard()?;

        assert!(catalog.get(Color::DarkBrown, Length::In10).is_none());
        assert_eq!(Length::In10.base_price(), Money::from_minor(4000, iso::USD));

        Ok(())
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert!(matches!(Catalog::new(Vec::new()), Err(CatalogError::Empty)));
    }

    #[test]
    fn duplicate_pair_is_rejected() -> TestResult {
        let mut variants = standard_variants();
        let duplicate = variants.first().ok_or("standard catalog is empty")?.clone();
        variants.push(duplicate);

        assert!(matches!(
            Catalog::new(variants),
            Err(CatalogError::DuplicateVariant(Color::NaturalBlack, Length::In14))
        ));

        Ok(())
    }

    #[test]
    fn price_above_original_is_rejected() -> TestResult {
        let mut variants = standard_variants();
        let first = variants.first_mut().ok_or("standard catalog is empty")?;
        first.original_price = Money::from_minor(100, iso::USD);

        assert!(matches!(
            Catalog::new(variants),
            Err(CatalogError::PriceAboveOriginal(_))
        ));

        Ok(())
    }

    #[test]
    fn variant_with_no_images_is_rejected() -> TestResult {
        let mut variants = standard_variants();
        let first = variants.first_mut().ok_or("standard catalog is empty")?;
        first.images.clear();

        assert!(matches!(Catalog::new(variants), Err(CatalogError::NoImages(_))));

        Ok(())
    }

    #[test]
    fn color_parses_labels_and_slugs() {
        assert_eq!(Color::parse("Dark Brown"), Some(Color::DarkBrown));
        assert_eq!(Color::parse("dark-brown"), Some(Color::DarkBrown));
        assert_eq!(Color::parse("chestnut"), None);
        assert_eq!(Color::from_input("chestnut"), Color::NaturalBlack);
    }

    #[test]
    fn length_parses_labels_and_inches() {
        assert_eq!(Length::parse("14\""), Some(Length::In14));
        assert_eq!(Length::parse("14"), Some(Length::In14));
        assert_eq!(Length::parse("15"), None);
        assert_eq!(Length::from_input("15"), Length::In18);
    }

    #[test]
    fn variant_id_is_the_selection_slug() {
        let id = VariantId::for_selection(Color::MediumBrown, Length::In20);

        assert_eq!(id.as_str(), "afro-kinky-medium-brown-20");
        assert_eq!(id.to_string(), "afro-kinky-medium-brown-20");
    }

    #[test]
    fn base_prices_rise_with_length() {
        let mut previous = 0;

        for length in Length::ALL {
            let minor = length.base_price().to_minor_units();
            assert!(minor > previous, "base price table must rise with length");
            previous = minor;
        }
    }
}
