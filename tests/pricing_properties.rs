//! Integration tests for the pricing properties the storefront relies
//! on: exact totals, monotone bundle savings, and variant resolution
//! that never copies a price across lengths.

use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use strand::{
    cart::{Cart, LineItem},
    catalog::{Catalog, Color, Length},
    packs::PackOptions,
    pricing::breakdown,
};

#[test]
fn totals_match_the_formula_for_every_catalog_variant_and_tier() -> TestResult {
    let catalog = Catalog::standard()?;
    let options = PackOptions::standard()?;

    for variant in catalog.variants() {
        for tier in options.tiers() {
            for quantity in 1..=3u32 {
                let pricing =
                    breakdown(variant.price, variant.original_price, tier, quantity)?;

                let base = variant.price.to_minor_units();
                let packs = i64::from(tier.count());
                let discount = tier.discount().to_minor_units();
                let expected = (base * packs - discount) * i64::from(quantity);

                assert_eq!(
                    pricing.total_price.to_minor_units(),
                    expected,
                    "total for {} x{} tier {}",
                    variant.id,
                    quantity,
                    tier.count(),
                );
                assert!(pricing.total_price.to_minor_units() >= 0, "total must be non-negative");
            }
        }
    }

    Ok(())
}

#[test]
fn bundle_savings_never_shrink_as_packs_grow() -> TestResult {
    let options = PackOptions::standard()?;

    for quantity in 1..=3u32 {
        let mut previous = -1;

        for tier in options.tiers() {
            let pricing = breakdown(
                Money::from_minor(5500, USD),
                Money::from_minor(7500, USD),
                tier,
                quantity,
            )?;

            let savings = pricing.savings.to_minor_units();
            assert!(
                savings >= previous,
                "savings shrank between tiers at quantity {quantity}"
            );
            previous = savings;
        }
    }

    Ok(())
}

#[test]
fn per_pack_price_never_exceeds_the_base_price() -> TestResult {
    let catalog = Catalog::standard()?;
    let options = PackOptions::standard()?;

    for variant in catalog.variants() {
        for tier in options.tiers() {
            let pricing = breakdown(variant.price, variant.original_price, tier, 1)?;

            assert!(
                pricing.price_per_pack.to_minor_units() <= variant.price.to_minor_units(),
                "discount inflated the per-pack price for {}",
                variant.id,
            );
        }
    }

    Ok(())
}

#[test]
fn eighteen_inch_two_pack_scenario() -> TestResult {
    let options = PackOptions::standard()?;

    // 18" base $55, 2-pack discount $5: per pack (55*2-5)/2 = 52.50,
    // total 110 - 5 = 105.
    let pricing = breakdown(
        Money::from_minor(5500, USD),
        Money::from_minor(7500, USD),
        &options.tier(2),
        1,
    )?;

    assert_eq!(pricing.price_per_pack, Money::from_minor(5250, USD));
    assert_eq!(pricing.total_price, Money::from_minor(10_500, USD));

    Ok(())
}

#[test]
fn fourteen_inch_three_singles_scenario() -> TestResult {
    let options = PackOptions::standard()?;

    // 14" base $45, three undiscounted single packs: 45*1*3 = 135.
    let pricing = breakdown(
        Money::from_minor(4500, USD),
        Money::from_minor(6500, USD),
        &options.tier(1),
        3,
    )?;

    assert_eq!(pricing.total_price, Money::from_minor(13_500, USD));

    Ok(())
}

#[test]
fn resolving_twice_yields_identical_output() -> TestResult {
    let catalog = Catalog::standard()?;

    for (color, length) in [
        (Color::NaturalBlack, Length::In18),
        (Color::DarkBrown, Length::In10),
        (Color::MediumBrown, Length::In12),
    ] {
        let first = catalog.resolve(color, length);
        let second = catalog.resolve(color, length);

        assert_eq!(first.variant().id, second.variant().id);
        assert_eq!(first.variant().price, second.variant().price);
        assert_eq!(first.is_synthesized(), second.is_synthesized());
    }

    Ok(())
}

#[test]
fn absent_combination_synthesizes_from_the_length_table() -> TestResult {
    let catalog = Catalog::standard()?;

    // 10" dark brown has no catalog entry; the synthesized variant must
    // be priced from the length table, not from the 14" dark brown row.
    let resolution = catalog.resolve(Color::DarkBrown, Length::In10);

    assert!(resolution.is_synthesized());

    let variant = resolution.variant();
    assert_eq!(variant.id.as_str(), "afro-kinky-dark-brown-10");
    assert_eq!(variant.price, Money::from_minor(4000, USD));

    let fourteen_inch = catalog
        .get(Color::DarkBrown, Length::In14)
        .ok_or("missing 14\" dark brown")?;
    assert_ne!(variant.price, fourteen_inch.price);

    Ok(())
}

#[test]
fn adding_the_same_selection_twice_merges_into_one_line() -> TestResult {
    let catalog = Catalog::standard()?;
    let options = PackOptions::standard()?;

    let variant = catalog.resolve(Color::NaturalBlack, Length::In18).into_variant();
    let tier = options.tier(2);
    let unit_price = breakdown(variant.price, variant.original_price, &tier, 1)?.total_price;

    let mut cart = Cart::new(USD);

    cart.add(LineItem::from_selection(&variant, tier.count(), 1, unit_price))?;
    cart.add(LineItem::from_selection(&variant, tier.count(), 1, unit_price))?;

    assert_eq!(cart.line_count(), 1);
    assert_eq!(cart.item_count(), 2);
    assert_eq!(cart.subtotal()?, Money::from_minor(21_000, USD));

    Ok(())
}
