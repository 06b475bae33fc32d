use std::{str::FromStr, sync::Arc};

use chrono::{Duration, Utc};
use clap::Parser;
use fake::{faker::lorem::en::Sentence, faker::name::en::Name, Fake};
use gymflow::{
    auth::TokenIssuer,
    domain::{BookingStatus, CreateClassRequest, CreatePaymentRequest, MembershipTier, RegisterRequest, Role},
    notifications::NotificationManager,
    service::ServiceContext,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Fills a GymFlow database with demo users, classes and bookings.
#[derive(Debug, Parser)]
#[command(name = "seed")]
struct Args {
    #[arg(long, default_value = "sqlite://gymflow.db")]
    database_url: String,

    /// Number of member accounts to create
    #[arg(long, default_value_t = 10)]
    members: usize,
}

const CLASS_NAMES: [&str; 5] = ["Morning Yoga", "HIIT", "Spin", "Pilates", "Boxing"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    println!("🌱 Starting database seeding...");

    let connect_options = SqliteConnectOptions::from_str(&args.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await?;

    println!("📋 Running migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await?;

    let services = ServiceContext::new(
        db_pool,
        Arc::new(TokenIssuer::new("seed-only", 1)),
        Arc::new(NotificationManager::new()),
    );

    println!("👥 Creating users...");

    services.user_service.register(RegisterRequest {
        name: "Admin User".to_string(),
        email: "admin@gymflow.local".to_string(),
        password: "admin123".to_string(),
        role: Role::Admin,
        membership_tier: MembershipTier::Vip,
    }).await?;
    println!("  ✅ Created admin user (admin@gymflow.local / admin123)");

    let trainer = services.user_service.register(RegisterRequest {
        name: Name().fake(),
        email: "trainer@gymflow.local".to_string(),
        password: "trainer123".to_string(),
        role: Role::Trainer,
        membership_tier: MembershipTier::Basic,
    }).await?.user;
    println!("  ✅ Created trainer {} (trainer@gymflow.local / trainer123)", trainer.name);

    let tiers = [MembershipTier::Basic, MembershipTier::Premium, MembershipTier::Vip];
    let mut members = Vec::with_capacity(args.members);
    for i in 0..args.members {
        let session = services.user_service.register(RegisterRequest {
            name: Name().fake(),
            email: format!("member{}@gymflow.local", i + 1),
            password: "password123".to_string(),
            role: Role::Member,
            membership_tier: tiers[i % tiers.len()],
        }).await?;
        members.push(session.user);
    }
    println!("  ✅ Created {} members (password123)", members.len());

    println!("🏋️ Creating classes...");
    let mut classes = Vec::new();
    for (day, name) in CLASS_NAMES.iter().enumerate() {
        let start = Utc::now() + Duration::days(day as i64 + 1);
        let class = services.booking_service.create_class(trainer.id, CreateClassRequest {
            name: name.to_string(),
            description: Sentence(4..10).fake(),
            trainer_id: None,
            capacity: 4,
            start_time: start,
            end_time: start + Duration::hours(1),
            price: 15.0,
        }).await?;
        println!("  ✅ {} at {}", class.name, class.start_time.format("%Y-%m-%d %H:%M"));
        classes.push(class);
    }

    println!("📅 Creating bookings...");
    let mut waitlisted = 0;
    if let Some(class) = classes.first() {
        for member in &members {
            let booking = services.booking_service.create_booking(member.id, class.id).await?;
            if booking.status == BookingStatus::Waitlist {
                waitlisted += 1;
                continue;
            }
            services.payment_service.create_payment(member.id, CreatePaymentRequest {
                booking_id: booking.id,
                amount: 15.0,
                method: "card".to_string(),
            }).await?;
        }
    }
    println!("  ✅ Booked {} members ({} on the waitlist)", members.len(), waitlisted);

    println!("🎉 Seeding complete!");
    Ok(())
}
