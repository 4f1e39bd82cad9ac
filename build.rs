use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// R2 low-discrepancy sequence constants (generalized golden ratio for 2D).
/// g is the plastic constant 1.32471795724...; a1 = 1/g, a2 = 1/g^2.
const R2_A1: f64 = 0.754_877_666_246_692_7;
const R2_A2: f64 = 0.569_840_290_998_053_2;

const SIZE: usize = 64;
const CELLS: usize = SIZE * SIZE;

fn fract(x: f64) -> f64 {
    x - x.floor()
}

/// Rank every cell of a 64x64 grid by the order the R2 sequence visits it.
///
/// R2 points are maximally spread, so consecutive ranks land far apart and
/// the resulting threshold texture has its energy at high spatial
/// frequencies. Collisions probe forward in row-major order so every cell
/// receives exactly one rank.
fn r2_ranks() -> Vec<u16> {
    let mut ranks = vec![u16::MAX; CELLS];
    let mut placed = 0usize;
    let mut n = 0u64;
    while placed < CELLS {
        let x = (fract(0.5 + n as f64 * R2_A1) * SIZE as f64) as usize % SIZE;
        let y = (fract(0.5 + n as f64 * R2_A2) * SIZE as f64) as usize % SIZE;
        let mut cell = y * SIZE + x;
        while ranks[cell] != u16::MAX {
            cell = (cell + 1) % CELLS;
        }
        ranks[cell] = placed as u16;
        placed += 1;
        n += 1;
    }
    ranks
}

fn write_table(file: &mut File, name: &str, doc: &str, values: &[i8]) {
    writeln!(file, "/// {doc}").unwrap();
    writeln!(file, "pub static {name}: [i8; {CELLS}] = [").unwrap();
    for (i, v) in values.iter().enumerate() {
        if i % 16 == 0 {
            write!(file, "    ").unwrap();
        }
        write!(file, "{v}, ").unwrap();
        if i % 16 == 15 {
            writeln!(file).unwrap();
        }
    }
    writeln!(file, "];").unwrap();
    writeln!(file).unwrap();
}

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("blue_noise.rs");
    let mut file = File::create(&dest_path).unwrap();

    let ranks = r2_ranks();

    // Uniform texture: each of the 256 byte values appears exactly 16 times.
    let uniform: Vec<u8> = ranks.iter().map(|&r| (r / 16) as u8).collect();
    let raw: Vec<i8> = uniform.iter().map(|&u| (u as i16 - 128) as i8).collect();

    // Triangular texture: fold two decorrelated uniform samples. Multiplying
    // the index by an odd constant mod 4096 is a bijection, so the second
    // sample is a permutation of the same multiset and the sum is triangular
    // with its peak at zero.
    let tri: Vec<i8> = (0..CELLS)
        .map(|i| {
            let a = uniform[i] as i16;
            let b = uniform[(i * 2741) % CELLS] as i16;
            (((a + b) >> 1) - 128) as i8
        })
        .collect();

    write_table(
        &mut file,
        "BLUE_NOISE_RAW",
        "64x64 tiling noise texture with a uniform byte distribution, indexed `(x & 63) | ((y & 63) << 6)`.",
        &raw,
    );
    write_table(
        &mut file,
        "BLUE_NOISE_TRI",
        "64x64 tiling noise texture with a triangular byte distribution peaked at zero.",
        &tri,
    );

    println!("cargo::rerun-if-changed=build.rs");
}
