#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use chrono::{Local, NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use courtbook::{
    build_schedule, export, parse,
    storage::{JsonStorage, Storage},
    BookingPrompt, Desk, DurationChoice, DurationMenu,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de réservation du court (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du registre
    #[arg(long, global = true, default_value = "court.json")]
    store: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Réserver un créneau
    Book {
        /// Prénom et nom ("John Doe")
        #[arg(long)]
        name: String,
        /// DD.MM.YYYY HH:MM
        #[arg(long)]
        when: String,
        /// Durée souhaitée (30, 60 ou 90 ; défaut : la plus longue offerte)
        #[arg(long)]
        minutes: Option<i64>,
        /// Accepter le créneau de repli si l'horaire est occupé
        #[arg(long)]
        take_next: bool,
    },

    /// Annuler la réservation d'une date
    Cancel {
        #[arg(long)]
        name: String,
        /// DD.MM.YYYY
        #[arg(long)]
        date: String,
    },

    /// Afficher l'agenda d'une plage de dates
    Schedule {
        /// DD.MM.YYYY
        #[arg(long)]
        from: String,
        /// DD.MM.YYYY
        #[arg(long)]
        to: String,
    },

    /// Exporter l'agenda vers un fichier JSON ou CSV
    Export {
        /// DD.MM.YYYY
        #[arg(long)]
        from: String,
        /// DD.MM.YYYY
        #[arg(long)]
        to: String,
        /// json ou csv
        #[arg(long)]
        format: String,
        /// Nom de base du fichier, extension ajoutée par l'export
        #[arg(long)]
        out: String,
    },
}

/// Répond au moteur de réservation à partir des drapeaux de la ligne de
/// commande : plus longue durée offerte sous la limite demandée, repli
/// accepté seulement avec `--take-next`.
struct FlagPrompt {
    minutes: Option<i64>,
    take_next: bool,
}

impl BookingPrompt for FlagPrompt {
    fn choose_duration(&mut self, menu: DurationMenu) -> DurationChoice {
        let limit = self.minutes.unwrap_or(i64::MAX);
        menu.choices()
            .into_iter()
            .rev()
            .find(|c| c.minutes().is_some_and(|m| m <= limit))
            .unwrap_or(DurationChoice::Cancel)
    }

    fn accept_alternative(&mut self, _date: NaiveDate, time: NaiveTime) -> bool {
        if self.take_next {
            println!("This time is occupied, booking {} instead.", time.format("%H:%M"));
            true
        } else {
            eprintln!(
                "This time is already occupied. Next available: {} (pass --take-next to book it).",
                time.format("%H:%M")
            );
            false
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.store)?;
    let mut desk = Desk::with_ledger(storage.load_or_default());

    let now = Local::now().naive_local();
    let today = now.date();

    let code = match cli.cmd {
        Commands::Book {
            name,
            when,
            minutes,
            take_next,
        } => {
            if let Some(m) = minutes {
                if ![30, 60, 90].contains(&m) {
                    bail!("--minutes must be 30, 60 or 90");
                }
            }
            let name = parse::normalize_client_name(&name)?;
            let at = parse::parse_booking_datetime(&when)?;
            let client = desk.register_client(&name);
            let mut prompt = FlagPrompt { minutes, take_next };
            match desk.book(&client, at.date(), at.time(), now, &mut prompt) {
                Ok(id) => {
                    let booked = desk
                        .ledger()
                        .find_reservation(&id)
                        .ok_or_else(|| anyhow::anyhow!("reservation vanished after booking"))?;
                    println!(
                        "A reservation for {} at {} for {} minutes has been added.",
                        booked.date.format("%d.%m.%Y"),
                        booked.start.format("%H:%M"),
                        booked.duration_minutes()
                    );
                    storage.save(desk.ledger())?;
                    0
                }
                Err(err) => {
                    eprintln!("Unfortunately, {err}.");
                    // Le client nouvellement rencontré reste enregistré.
                    storage.save(desk.ledger())?;
                    1
                }
            }
        }
        Commands::Cancel { name, date } => {
            let name = parse::normalize_client_name(&name)?;
            let date = parse::parse_date(&date)?;
            let client = desk.register_client(&name);
            match desk.cancel(&client, date, now) {
                Ok(_) => {
                    println!(
                        "Your reservation for {} has been cancelled.",
                        date.format("%d.%m.%Y")
                    );
                    storage.save(desk.ledger())?;
                    0
                }
                Err(err) => {
                    eprintln!("Unfortunately, {err}.");
                    storage.save(desk.ledger())?;
                    1
                }
            }
        }
        Commands::Schedule { from, to } => {
            let from = parse::parse_date(&from)?;
            let to = parse::parse_date(&to)?;
            let schedule = build_schedule(desk.ledger(), from, to);
            print!("{}", export::render_text(&schedule, today));
            0
        }
        Commands::Export {
            from,
            to,
            format,
            out,
        } => {
            let from = parse::parse_date(&from)?;
            let to = parse::parse_date(&to)?;
            let schedule = build_schedule(desk.ledger(), from, to);
            let path = match format.as_str() {
                "json" => export::export_json(".", &out, &schedule)?,
                "csv" => export::export_csv(".", &out, &schedule)?,
                other => bail!("unknown export format {other:?}, expected json or csv"),
            };
            println!("The schedule has been saved in {}.", path.display());
            0
        }
    };

    std::process::exit(code);
}
