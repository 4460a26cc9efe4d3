//! Storefront Example
//!
//! Walks one selection through the full flow: resolve the variant,
//! price the bundle, add it to a cart, derive totals and run a sandbox
//! checkout.
//!
//! Use `-c` and `-l` to pick a color and length
//! Use `-p` and `-q` for pack count and quantity
//! Use `-f` to load a fixture set by name instead of the shipped catalog

use std::io;

use anyhow::Result;
use clap::Parser;

use strand::{
    cart::{Cart, LineItem},
    catalog::{Catalog, Color, Length},
    checkout::{Checkout, CheckoutForm},
    fixtures::Fixture,
    notify::LoggingSender,
    packs::PackOptions,
    payment::SandboxProcessor,
    pricing::breakdown,
    totals::ShippingSpeed,
    utils::DemoArgs,
};

/// Storefront Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = DemoArgs::parse();

    let fixture = match args.fixture.as_deref() {
        Some(name) => Some(Fixture::from_set(name)?),
        None => None,
    };

    let standard_catalog;
    let standard_packs;

    let (catalog, packs): (&Catalog<'_>, &PackOptions<'_>) = match &fixture {
        Some(fixture) => (fixture.catalog()?, fixture.packs()?),
        None => {
            standard_catalog = Catalog::standard()?;
            standard_packs = PackOptions::standard()?;
            (&standard_catalog, &standard_packs)
        }
    };

    let color = Color::from_input(&args.color);
    let length = Length::from_input(&args.length);

    let resolution = catalog.resolve(color, length);
    let variant = resolution.variant();

    println!(
        "{}: {}{}",
        variant.id,
        variant.name,
        if resolution.is_synthesized() {
            " (synthesized)"
        } else {
            ""
        }
    );

    let tier = packs.tier(args.packs);
    let pricing = breakdown(variant.price, variant.original_price, &tier, args.quantity)?;

    println!(
        "{} per pack, {} per {}-pack bundle ({}% off {})",
        pricing.base_price,
        pricing.price_per_pack,
        tier.count(),
        pricing.discount_percentage,
        pricing.original_price,
    );
    println!("Total {} (saves {})", pricing.total_price, pricing.savings);

    let unit_price = breakdown(variant.price, variant.original_price, &tier, 1)?.total_price;

    let mut cart = Cart::new(catalog.currency());
    cart.add(LineItem::from_selection(
        variant,
        tier.count(),
        args.quantity,
        unit_price,
    ))?;

    let speed = if args.expedited {
        ShippingSpeed::Expedited
    } else {
        ShippingSpeed::Standard
    };

    let mut checkout = Checkout::new(SandboxProcessor::new(), LoggingSender);

    let form = CheckoutForm {
        email: "demo@example.com".to_owned(),
        first_name: "Demo".to_owned(),
        last_name: "Customer".to_owned(),
        address: "1 Demo Street".to_owned(),
        city: "Austin".to_owned(),
        state: "TX".to_owned(),
        zip_code: "73301".to_owned(),
        card_number: "4242424242424242".to_owned(),
        expiry_date: "12/27".to_owned(),
        cvv: "123".to_owned(),
        name_on_card: "Demo Customer".to_owned(),
    };

    let confirmation = checkout.submit(&mut cart, &form, speed)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    confirmation.write_to(&mut handle)?;

    Ok(())
}
