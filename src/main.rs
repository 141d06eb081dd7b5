use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roombook::booking::BookingService;
use roombook::client::BookingClient;
use roombook::config::Config;
use roombook::models::*;
use roombook::{api, db};

#[derive(Parser)]
#[command(name = "roombook")]
#[command(about = "Room reservation booking service")]
struct Cli {
    /// Path to a JSON config file (defaults to ./config.json when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the booking server
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port for HTTP API (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// List all rooms
    Rooms,
    /// List rooms free for one hour from the given time
    Available {
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Start time (HH:MM)
        #[arg(long)]
        time: String,
    },
    /// Book a room
    Reserve {
        #[arg(long)]
        room: String,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Start time (HH:MM)
        #[arg(long)]
        start: String,
        /// End time (HH:MM)
        #[arg(long)]
        end: String,
    },
    /// Cancel a reservation by id
    Cancel { id: i64 },
    /// List reservations, optionally filtered by room and date
    Reservations {
        #[arg(long)]
        room: Option<String>,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "roombook=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn serve(mut config: Config, host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    let db = match &config.database_path {
        Some(path) => db::Database::open(path.clone())?,
        None => db::Database::open_default()?,
    };
    db.migrate()?;

    let added = db.seed_rooms(&config.rooms)?;
    if added > 0 {
        tracing::info!("Seeded {} room(s) from config", added);
    }

    let app = api::create_router(BookingService::new(db));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Booking server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

fn print_rooms(rooms: &[Room]) {
    if rooms.is_empty() {
        println!("No rooms available.");
        return;
    }
    for (i, room) in rooms.iter().enumerate() {
        println!("{}. {} (capacity: {})", i + 1, room.name, room.capacity);
    }
}

fn print_reservation(r: &Reservation) {
    println!(
        "#{}  {}  {}  {}",
        r.id,
        r.room_name,
        r.date,
        r.slot()
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = Config::load(cli.config.as_deref())?;
    let client = BookingClient::from_env();

    match cli.command {
        Some(Commands::Serve { host, port }) => serve(config, host, port).await?,
        None => serve(config, None, None).await?,
        Some(Commands::Rooms) => print_rooms(&client.list_rooms().await?),
        Some(Commands::Available { date, time }) => {
            let rooms = client
                .list_available_rooms(&AvailabilityQuery { date, time })
                .await?;
            print_rooms(&rooms);
        }
        Some(Commands::Reserve {
            room,
            date,
            start,
            end,
        }) => {
            let reservation = client
                .create_reservation(&CreateReservationInput {
                    room_name: room,
                    date,
                    start_time: start,
                    end_time: end,
                })
                .await?;
            println!("Reservation created:");
            print_reservation(&reservation);
        }
        Some(Commands::Cancel { id }) => {
            client.cancel_reservation(id).await?;
            println!("Reservation {} cancelled.", id);
        }
        Some(Commands::Reservations { room, date }) => {
            let reservations = client
                .list_reservations(&ReservationFilter {
                    room_name: room,
                    date,
                })
                .await?;
            if reservations.is_empty() {
                println!("No reservations found.");
            }
            for r in &reservations {
                print_reservation(r);
            }
        }
    }

    Ok(())
}
