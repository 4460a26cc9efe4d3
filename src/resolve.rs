//! Variant resolution

use crate::catalog::{Catalog, Color, Length, Variant, VariantId, original_price_for};

/// Outcome of resolving a (color, length) selection.
///
/// Callers that only need a renderable variant can use
/// [`Resolution::variant`]; the two arms stay distinguishable so tests
/// and analytics can tell a real catalog entry from a synthesized one.
#[derive(Debug, Clone)]
pub enum Resolution<'a> {
    /// The catalog holds an entry for the exact pair.
    Exact(Variant<'a>),

    /// No catalog entry exists; a placeholder variant was synthesized
    /// from the color's base entry with its price recomputed from the
    /// length price table.
    Synthesized(Variant<'a>),
}

impl<'a> Resolution<'a> {
    /// The resolved variant, whichever way it was produced.
    #[must_use]
    pub fn variant(&self) -> &Variant<'a> {
        match self {
            Resolution::Exact(variant) | Resolution::Synthesized(variant) => variant,
        }
    }

    /// Consume the resolution, returning the variant.
    #[must_use]
    pub fn into_variant(self) -> Variant<'a> {
        match self {
            Resolution::Exact(variant) | Resolution::Synthesized(variant) => variant,
        }
    }

    /// Whether the variant was synthesized rather than found.
    #[must_use]
    pub fn is_synthesized(&self) -> bool {
        matches!(self, Resolution::Synthesized(_))
    }
}

impl<'a> Catalog<'a> {
    /// Resolve a (color, length) selection to a variant.
    ///
    /// Returns the exact catalog entry when one exists. Otherwise
    /// synthesizes a placeholder that inherits the base entry's images
    /// and description but carries its own id and a price taken from
    /// the length price table, never the base entry's price, which
    /// belongs to a different length.
    ///
    /// Resolution never fails for enum inputs: the catalog is sparse
    /// against the full color × length cross-product, and every
    /// combination must stay renderable.
    #[must_use]
    pub fn resolve(&self, color: Color, length: Length) -> Resolution<'a> {
        if let Some(variant) = self.get(color, length) {
            return Resolution::Exact(variant.clone());
        }

        Resolution::Synthesized(self.synthesize(color, length))
    }

    /// Build the placeholder variant for a pair the catalog lacks.
    fn synthesize(&self, color: Color, length: Length) -> Variant<'a> {
        // Prefer a same-color donor for images and copy; construction
        // guarantees at least one variant exists somewhere.
        let base = self
            .by_color(color)
            .next()
            .or_else(|| self.variants().first());

        let price = length.base_price();
        let original_price = original_price_for(price);

        let mut variant = match base {
            Some(base) => base.clone(),
            None => return placeholder(color, length),
        };

        variant.id = VariantId::for_selection(color, length);
        variant.name = format!("Afro Kinky Bulk Hair - {} {}", color.label(), length.label());
        variant.color = color;
        variant.length = length;
        variant.price = price;
        variant.original_price = original_price;

        variant
    }
}

/// Bare-bones variant for the unreachable empty-catalog case, kept so
/// `resolve` stays total without panicking paths.
fn placeholder<'a>(color: Color, length: Length) -> Variant<'a> {
    let price = length.base_price();

    Variant {
        id: VariantId::for_selection(color, length),
        name: format!("Afro Kinky Bulk Hair - {} {}", color.label(), length.label()),
        color,
        length,
        price,
        original_price: original_price_for(price),
        rating: 0.0,
        reviews: 0,
        images: smallvec::SmallVec::new(),
        description: String::new(),
        weight: "100g".to_owned(),
        texture: "Afro Kinky".to_owned(),
        features: Vec::new(),
        popular: false,
    }
}
