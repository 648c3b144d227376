use fireworks_store_api::{config::AppConfig, db::create_pool};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    seed_categories(&pool).await?;
    seed_products(&pool).await?;
    seed_promo_codes(&pool).await?;

    println!("Seed completed");
    Ok(())
}

async fn seed_categories(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    for name in ["sparklers", "sky_shots", "ground_chakkars", "flower_pots"] {
        sqlx::query("INSERT INTO categories (product_type) VALUES ($1) ON CONFLICT DO NOTHING")
            .bind(name)
            .execute(pool)
            .await?;
    }

    println!("Seeded categories");
    Ok(())
}

async fn seed_products(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let products = vec![
        ("sparklers", "SP-001", "12cm Electric Sparkler", 45.0, "box", 10.0),
        ("sparklers", "SP-002", "30cm Colour Sparkler", 120.0, "box", 15.0),
        ("sky_shots", "SK-001", "30 Shot Repeater", 850.0, "pieces", 20.0),
        ("ground_chakkars", "GC-001", "Deluxe Chakkar", 95.0, "pkt", 5.0),
        ("flower_pots", "FP-001", "Colour Koti", 150.0, "box", 12.0),
    ];

    for (category, serial, name, price, per, discount) in products {
        sqlx::query(
            r#"
            INSERT INTO products (category, serial_number, productname, price, per, discount)
            VALUES ($1, $2, $3, $4, $5::per_unit, $6)
            ON CONFLICT (category, serial_number) DO NOTHING
            "#,
        )
        .bind(category)
        .bind(serial)
        .bind(name)
        .bind(price)
        .bind(per)
        .bind(discount)
        .execute(pool)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}

async fn seed_promo_codes(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let promos: Vec<(&str, f64, Option<&str>, Option<f64>)> = vec![
        ("DIWALI10", 10.0, None, Some(500.0)),
        ("SPARK5", 5.0, Some("sparklers"), None),
    ];

    for (code, percent, category, min_amount) in promos {
        sqlx::query(
            r#"
            INSERT INTO promo_codes (id, code, percent, category, min_amount)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (code) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(code)
        .bind(percent)
        .bind(category)
        .bind(min_amount)
        .execute(pool)
        .await?;
    }

    println!("Seeded promo codes");
    Ok(())
}
