//! Writes `sample_flows.csv` and a matching `keep_columns.txt` for trying
//! out rowsieve by hand.

use anyhow::{Context, Result};

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

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len() as u64) as usize]
    }
}

const COLUMNS: [&str; 8] = [
    "Receive Time",
    "Source address",
    "Destination address",
    "Protocol",
    "Destination Port",
    "Action",
    "Bytes",
    "Rule",
];

const KEEP: [&str; 5] = [
    "Source address",
    "Destination address",
    "Protocol",
    "Destination Port",
    "Action",
];

fn random_address(rng: &mut SimpleRng) -> String {
    match rng.below(10) {
        0..=5 => format!("10.0.{}.{}", rng.below(4), 1 + rng.below(254)),
        6..=7 => format!("192.168.1.{}", 1 + rng.below(254)),
        8 => format!("203.0.113.{}", 1 + rng.below(254)),
        _ => format!("2001:db8::{:x}", 1 + rng.below(0xffff)),
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let n_rows = 500;

    let protocols = ["TCP", "UDP", "ICMP"];
    let ports = ["22", "53", "80", "123", "443", "3389"];
    let actions = ["allow", "deny", "drop"];

    let output_path = "sample_flows.csv";
    let mut writer = csv::Writer::from_path(output_path).context("creating sample CSV")?;
    writer.write_record(COLUMNS)?;

    for i in 0..n_rows {
        let protocol = *rng.pick(&protocols);
        let port = if protocol == "ICMP" { "" } else { *rng.pick(&ports) };
        let record = [
            format!("2023-08-14 09:{:02}:{:02}", i / 60 % 60, i % 60),
            random_address(&mut rng),
            random_address(&mut rng),
            protocol.to_string(),
            port.to_string(),
            rng.pick(&actions).to_string(),
            (64 + rng.below(64_000)).to_string(),
            format!("rule-{}", rng.below(12)),
        ];
        writer.write_record(&record)?;
    }
    writer.flush()?;

    std::fs::write("keep_columns.txt", KEEP.join("\n") + "\n")
        .context("writing keep_columns.txt")?;

    println!("Wrote {n_rows} flows ({} columns) to {output_path}", COLUMNS.len());
    Ok(())
}
