use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Days, NaiveDate, NaiveDateTime};
use clap::{Parser, ValueEnum};
use parquet::arrow::ArrowWriter;

const TRIPS_PER_CITY: usize = 500;
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Uniform index into a slice of length `n`.
    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }
}

// ---------------------------------------------------------------------------
// City profiles
// ---------------------------------------------------------------------------

struct CityProfile {
    file_stem: &'static str,
    seed: u64,
    stations: &'static [&'static str],
    /// Washington publishes no Gender / Birth Year columns.
    demographics: bool,
}

const CITIES: [CityProfile; 3] = [
    CityProfile {
        file_stem: "chicago",
        seed: 42,
        stations: &[
            "Streeter Dr & Grand Ave",
            "Lake Shore Dr & Monroe St",
            "Clinton St & Washington Blvd",
            "Canal St & Adams St",
            "Michigan Ave & Oak St",
            "Theater on the Lake",
        ],
        demographics: true,
    },
    CityProfile {
        file_stem: "new_york_city",
        seed: 7,
        stations: &[
            "Pershing Square North",
            "E 17 St & Broadway",
            "W 21 St & 6 Ave",
            "West St & Chambers St",
            "Broadway & E 22 St",
            "8 Ave & W 31 St",
        ],
        demographics: true,
    },
    CityProfile {
        file_stem: "washington",
        seed: 2017,
        stations: &[
            "Columbus Circle / Union Station",
            "Lincoln Memorial",
            "Jefferson Dr & 14th St SW",
            "Massachusetts Ave & Dupont Circle NW",
            "15th & P St NW",
            "Thomas Circle",
        ],
        demographics: false,
    },
];

struct SampleTrip {
    id: i64,
    start: NaiveDateTime,
    end: NaiveDateTime,
    duration: i64,
    start_station: String,
    end_station: String,
    user_type: String,
    gender: Option<String>,
    birth_year: Option<f64>,
}

fn generate_city(profile: &CityProfile) -> Result<Vec<SampleTrip>> {
    let mut rng = SimpleRng::new(profile.seed);
    let first_day = NaiveDate::from_ymd_opt(2017, 1, 1).context("invalid start date")?;
    // January through June 2017.
    let days_in_range = 181;

    let mut trips = Vec::with_capacity(TRIPS_PER_CITY);
    for i in 0..TRIPS_PER_CITY {
        let date = first_day
            .checked_add_days(Days::new(rng.below(days_in_range) as u64))
            .context("date out of range")?;
        // Commuter peaks around 08h and 17h.
        let peak = if rng.next_f64() < 0.5 { 8.0 } else { 17.5 };
        let hour = rng.gauss(peak, 2.5).clamp(0.0, 23.0) as u32;
        let minute = rng.below(60) as u32;
        let second = rng.below(60) as u32;
        let start = date
            .and_hms_opt(hour, minute, second)
            .context("invalid start time")?;

        let duration = rng.gauss(6.4, 0.6).exp().round().max(60.0) as i64;
        let end = start + chrono::Duration::seconds(duration);

        let user_type = match rng.next_f64() {
            x if x < 0.78 => "Subscriber",
            x if x < 0.995 => "Customer",
            _ => "Dependent",
        };

        let (gender, birth_year) = if profile.demographics && user_type == "Subscriber" {
            let gender = rng.pick(&["Male", "Male", "Male", "Female"]).to_string();
            let year = rng.gauss(1982.0, 11.0).clamp(1920.0, 2002.0).round();
            (Some(gender), Some(year))
        } else {
            (None, None)
        };

        trips.push(SampleTrip {
            id: 1_000_000 + i as i64,
            start,
            end,
            duration,
            start_station: rng.pick(profile.stations).to_string(),
            end_station: rng.pick(profile.stations).to_string(),
            user_type: user_type.to_string(),
            gender,
            birth_year,
        });
    }
    Ok(trips)
}

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

fn headers(demographics: bool) -> Vec<&'static str> {
    let mut headers = vec![
        "Trip Id",
        "Start Time",
        "End Time",
        "Trip Duration",
        "Start Station",
        "End Station",
        "User Type",
    ];
    if demographics {
        headers.extend(["Gender", "Birth Year"]);
    }
    headers
}

fn write_csv(path: &Path, trips: &[SampleTrip], demographics: bool) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer.write_record(headers(demographics))?;
    for trip in trips {
        let mut record = vec![
            trip.id.to_string(),
            trip.start.format(TIME_FORMAT).to_string(),
            trip.end.format(TIME_FORMAT).to_string(),
            trip.duration.to_string(),
            trip.start_station.clone(),
            trip.end_station.clone(),
            trip.user_type.clone(),
        ];
        if demographics {
            record.push(trip.gender.clone().unwrap_or_default());
            record.push(trip.birth_year.map(|y| format!("{y:.1}")).unwrap_or_default());
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &Path, trips: &[SampleTrip], demographics: bool) -> Result<()> {
    let text = |f: fn(&SampleTrip) -> String| -> ArrayRef {
        Arc::new(StringArray::from_iter_values(trips.iter().map(f)))
    };

    let mut fields = vec![
        Field::new("Trip Id", DataType::Int64, false),
        Field::new("Start Time", DataType::Utf8, false),
        Field::new("End Time", DataType::Utf8, false),
        Field::new("Trip Duration", DataType::Int64, false),
        Field::new("Start Station", DataType::Utf8, false),
        Field::new("End Station", DataType::Utf8, false),
        Field::new("User Type", DataType::Utf8, false),
    ];
    let mut columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from_iter_values(trips.iter().map(|t| t.id))),
        text(|t| t.start.format(TIME_FORMAT).to_string()),
        text(|t| t.end.format(TIME_FORMAT).to_string()),
        Arc::new(Int64Array::from_iter_values(trips.iter().map(|t| t.duration))),
        text(|t| t.start_station.clone()),
        text(|t| t.end_station.clone()),
        text(|t| t.user_type.clone()),
    ];
    if demographics {
        fields.push(Field::new("Gender", DataType::Utf8, true));
        fields.push(Field::new("Birth Year", DataType::Float64, true));
        columns.push(Arc::new(
            trips.iter().map(|t| t.gender.as_deref()).collect::<StringArray>(),
        ));
        columns.push(Arc::new(
            trips.iter().map(|t| t.birth_year).collect::<Float64Array>(),
        ));
    }

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Csv,
    Parquet,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Parquet => "parquet",
        }
    }
}

/// Write synthetic Chicago, New York City and Washington trip files.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Directory the city files are written to
    #[arg(default_value = ".")]
    out_dir: PathBuf,

    /// Output file format
    #[arg(value_enum, default_value_t = Format::Csv)]
    format: Format,
}

fn write_cities(out_dir: &Path, format: Format) -> Result<()> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    for profile in &CITIES {
        let trips = generate_city(profile)?;
        let path = out_dir.join(format!("{}.{}", profile.file_stem, format.extension()));
        match format {
            Format::Csv => write_csv(&path, &trips, profile.demographics)?,
            Format::Parquet => write_parquet(&path, &trips, profile.demographics)?,
        }
        println!("Wrote {} trips to {}", trips.len(), path.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    write_cities(&args.out_dir, args.format)
}
