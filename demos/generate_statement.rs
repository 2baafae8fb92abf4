use std::env;
use std::fs::{create_dir_all, File};
use std::io::{self, stdout, Write};
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;

const PROBABILITY_CREDIT: f64 = 0.15;
const PROBABILITY_INVALID: f64 = 0.01;
const PROBABILITY_HIGH_RISK: f64 = 0.02;

const MONTHS: [&str; 12] = ["ENE", "FEB", "MAR", "ABR", "MAY", "JUN", "JUL", "AGO", "SEP", "OCT", "NOV", "DIC"];
const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

const MERCHANTS: [&str; 10] = [
    "UBER *TRIP",
    "UBER *EATS",
    "PAYPAL *SPOTIFY",
    "PAYPAL *NETFLIX",
    "RESTAURANTE EL PATIO",
    "\"REST. LA CASA, S.A.\"",
    "SPEI ENVIADO BANORTE",
    "CLIP MX FARMACIA",
    "OXXO SUCURSAL 123",
    "COMISIÓN ANUALIDAD"
];

const PAYERS: [&str; 3] = ["DEPÓSITO NÓMINA", "SPEI RECIBIDO", "ABONO INTERÉS"];

struct GeneratorConfig {
    num_records: usize,
    output_path: String,
}

impl GeneratorConfig {
    fn from_args() -> Self {
        let args: Vec<String> = env::args().collect();
        let num_records = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100_000);

        Self {
            num_records,
            output_path: "samples/generated_statement.csv".to_string(),
        }
    }
}

fn main() -> io::Result<()> {
    let config = GeneratorConfig::from_args();

    println!("Generating {} statement rows in {}...", config.num_records, config.output_path);

    if let Some(parent) = Path::new(&config.output_path).parent() {
        create_dir_all(parent)?;
    }

    let file = File::create(&config.output_path)?;
    let mut writer = io::BufWriter::new(file);

    write_latin1(&mut writer, "OPERACION,LIQUIDACION,DESCRIPCION,CARGOS,ABONOS,RFC,REFERENCIA")?;

    let mut rng = rand::thread_rng();

    for reference in 1..=config.num_records {
        let date = generate_date(&mut rng);

        let row = if rng.gen_bool(PROBABILITY_INVALID) {
            generate_invalid_row(&mut rng, &date, reference)
        } else if rng.gen_bool(PROBABILITY_CREDIT) {
            generate_credit(&mut rng, &date, reference)
        } else {
            generate_charge(&mut rng, &date, reference)
        };

        write_latin1(&mut writer, &row)?;

        if reference % 10_000 == 0 {
            print!(".");
            stdout().flush()?;
        }
    }

    writer.flush()?;

    println!("\nGeneration complete.");

    Ok(())
}

//NOTE: Every char written here is below U+0100, so one byte per char is exact ISO-8859-1
fn write_latin1<W: Write>(writer: &mut W, line: &str) -> io::Result<()> {
    let bytes: Vec<u8> = line.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect();

    writer.write_all(&bytes)?;
    writer.write_all(b"\r\n")
}

fn generate_date<R: Rng>(rng: &mut R) -> String {
    let month = rng.gen_range(0..12);
    let day = rng.gen_range(1..=DAYS_IN_MONTH[month]);

    format!("{:02}/{}", day, MONTHS[month])
}

fn generate_amount<R: Rng>(rng: &mut R, max_cents: i64) -> String {
    let amount = Decimal::new(rng.gen_range(1..=max_cents), 2);

    match rng.gen_range(0..4) {
        0 => format!("{amount}"),
        1 => format!("${amount}"),
        2 => format!("\"{}\"", with_thousands(amount, ',', '.')),
        _ => format!("\"{}\"", with_thousands(amount, '.', ',')),
    }
}

fn with_thousands(amount: Decimal, group: char, decimal: char) -> String {
    let text = amount.to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((&text, "00"));

    let mut grouped = String::new();

    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(group);
        }

        grouped.push(digit);
    }

    format!("{grouped}{decimal}{fraction}")
}

fn generate_rfc<R: Rng>(rng: &mut R) -> String {
    let letters: String = (0..3).map(|_| rng.gen_range(b'A'..=b'Z') as char).collect();

    format!("{}{:06}{}", letters, rng.gen_range(0..1_000_000), "XX1")
}

fn generate_charge<R: Rng>(rng: &mut R, date: &str, reference: usize) -> String {
    let merchant = MERCHANTS.choose(rng).copied().unwrap_or(MERCHANTS[0]);

    let max_cents = if rng.gen_bool(PROBABILITY_HIGH_RISK) { 5_000_000 } else { 500_000 };
    let amount = generate_amount(rng, max_cents);

    format!("{},{},{},,{},{:08}", date, merchant, amount, generate_rfc(rng), reference)
}

fn generate_credit<R: Rng>(rng: &mut R, date: &str, reference: usize) -> String {
    let payer = PAYERS.choose(rng).copied().unwrap_or(PAYERS[0]);
    let amount = generate_amount(rng, 3_000_000);

    format!("{},{},,{},{},{:08}", date, payer, amount, generate_rfc(rng), reference)
}

fn generate_invalid_row<R: Rng>(rng: &mut R, date: &str, reference: usize) -> String {
    let invalid_rows = [
        format!("32/ENE,UBER *TRIP,10.00,,,{reference:08}"),
        format!("15/XYZ,UBER *TRIP,10.00,,,{reference:08}"),
        format!("{date},OXXO,abc,,,{reference:08}"),
        format!("{date},OXXO,,--5,,{reference:08}"),
        format!("2023-01-15,CLIP MX,10.00,,,{reference:08}"),
        "junk".to_string()
    ];

    invalid_rows.choose(rng).cloned().unwrap_or_default()
}
