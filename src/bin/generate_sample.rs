use std::fs::File;
use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

const HEADERS: [&str; 7] = [
    "id",
    "price",
    "room_type",
    "bedrooms",
    "review_scores_rating",
    "host_id",
    "host_location",
];

fn main() {
    let mut rng = SimpleRng::new(42);

    let room_types = ["Entire home/apt", "Private room", "Shared room"];
    let hosts = [
        ("1001", "Paris, France"),
        ("1002", "Paris, France"),
        ("1003", "Lyon, France"),
        ("1004", "Berlin, Germany"),
        ("1005", "Porto, Portugal"),
    ];

    let mut rows: Vec<Vec<String>> = Vec::new();
    for id in 0..200 {
        let (host_id, host_location) = rng.pick(&hosts);
        let room_type = rng.pick(&room_types);
        let bedrooms = 1 + (rng.next_u64() % 4);

        // Roughly one row in twelve has no listed price, and one in ten has
        // no review score, so the soft-failure paths get exercised.
        let price = if rng.next_u64() % 12 == 0 {
            String::new()
        } else {
            let amount = 30.0 + rng.next_f64() * 40.0 * bedrooms as f64;
            format!("${amount:.2}")
        };
        let rating = if rng.next_u64() % 10 == 0 {
            String::new()
        } else {
            format!("{:.1}", 60.0 + rng.next_f64() * 40.0)
        };

        rows.push(vec![
            id.to_string(),
            price,
            room_type.to_string(),
            bedrooms.to_string(),
            rating,
            host_id.to_string(),
            host_location.to_string(),
        ]);
    }

    write_csv("sample_listings.csv", &rows);
    write_csv_gz("sample_listings.csv.gz", &rows);

    println!("Wrote {} listings to sample_listings.csv(.gz)", rows.len());
}

fn write_rows<W: Write>(writer: W, rows: &[Vec<String>]) -> W {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(HEADERS)
        .expect("Failed to write header");
    for row in rows {
        csv_writer.write_record(row).expect("Failed to write row");
    }
    csv_writer.into_inner().expect("Failed to flush")
}

fn write_csv(path: &str, rows: &[Vec<String>]) {
    let file = File::create(path).expect("Failed to create output file");
    write_rows(file, rows);
}

fn write_csv_gz(path: &str, rows: &[Vec<String>]) {
    let file = File::create(path).expect("Failed to create output file");
    let encoder = GzEncoder::new(file, Compression::default());
    let encoder = write_rows(encoder, rows);
    encoder.finish().expect("Failed to finish gzip stream");
}
