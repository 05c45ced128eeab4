use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Column layout of the municipal agenda export, A through Y.
const HEADER: [&str; 25] = [
    "ID-EVENTO",
    "TITULO",
    "PRECIO",
    "GRATUITO",
    "LARGA-DURACION",
    "DIAS-SEMANA",
    "DIAS-EXCLUIDOS",
    "FECHA",
    "FECHA-FIN",
    "HORA",
    "DESCRIPCION",
    "URL-CONTENIDO",
    "TITULO-ACTIVIDAD",
    "URL-ACTIVIDAD",
    "URL-INSTALACION",
    "NOMBRE-INSTALACION",
    "ACCESIBILIDAD-INSTALACION",
    "CLASE-VIAL-INSTALACION",
    "NOMBRE-VIA-INSTALACION",
    "NUM-INSTALACION",
    "CODIGO-POSTAL-INSTALACION",
    "DISTRITO-INSTALACION",
    "BARRIO-INSTALACION",
    "TIPO",
    "AUDIENCIA",
];

const TITLES: [&str; 10] = [
    "Concierto de jazz en el parque",
    "Taller infantil de pintura",
    "Ciclo de cine clásico",
    "Encuentro Mujer y Ciencia",
    "Jornada deportiva popular",
    "Recital de poesía",
    "Teatro de calle",
    "Visita guiada al Madrid de los Austrias",
    "Actividades en centros de mayores",
    "Exposición de fotografía",
];

const WEEKDAYS: [&str; 7] = ["L,M", "X", "J,V", "S,D", "V,S,D", "L,M,X,J", "D"];

const DISTRICTS: [&str; 8] = [
    "CENTRO",
    "RETIRO",
    "USERA",
    "CHAMBERI",
    "VILLAVERDE",
    "ARGANZUELA",
    "SALAMANCA",
    "TETUAN",
];

const KINDS: [&str; 6] = [
    "/contenido/actividades/ProgramacionDestacadaAgendaCultura",
    "/contenido/actividades/Musica",
    "/contenido/actividades/Flamenco",
    "/contenido/actividades/CuentacuentosTiteresMarionetas",
    "/contenido/actividades/TeatroPerformance",
    "/contenido/actividades/Exposiciones",
];

const AUDIENCES: [&str; 5] = ["", "Jovenes", "Niños", "Familias", "Mayores"];

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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let n_events: i64 = 120;

    // columns[c][r]; column A is numeric and handled separately
    let mut columns: Vec<Vec<String>> = vec![Vec::new(); HEADER.len() - 1];
    let ids: Vec<i64> = (0..n_events).map(|i| 11000 + i).collect();

    for (i, _) in ids.iter().enumerate() {
        let free = rng.next_f64() < 0.4;
        let row: [String; 24] = [
            rng.pick(&TITLES).to_string(),
            if free { String::new() } else { format!("{} €", 5 + i % 20) },
            if free { "1" } else { "0" }.to_string(),
            "0".to_string(),
            rng.pick(&WEEKDAYS).to_string(),
            String::new(),
            format!("2024-06-{:02} 00:00:00.0", 1 + i % 28),
            format!("2024-06-{:02} 23:59:00.0", 1 + i % 28),
            format!("{:02}:00", 10 + i % 12),
            String::new(),
            format!("https://agenda.example/evento/{i}"),
            String::new(),
            String::new(),
            String::new(),
            format!("Centro Cultural {}", 1 + i % 9),
            String::new(),
            "CALLE".to_string(),
            "MAYOR".to_string(),
            (1 + i % 90).to_string(),
            format!("280{:02}", 1 + i % 50),
            rng.pick(&DISTRICTS).to_string(),
            String::new(),
            rng.pick(&KINDS).to_string(),
            rng.pick(&AUDIENCES).to_string(),
        ];
        for (col, value) in columns.iter_mut().zip(row) {
            col.push(value);
        }
    }

    // Parquet: A is Int64, the rest Utf8 with empty cells as nulls.
    let mut fields = vec![Field::new(HEADER[0], DataType::Int64, false)];
    let mut arrays: Vec<ArrayRef> = vec![Arc::new(Int64Array::from(ids.clone()))];
    for (name, values) in HEADER[1..].iter().zip(&columns) {
        fields.push(Field::new(*name, DataType::Utf8, true));
        let array: StringArray = values
            .iter()
            .map(|v| (!v.is_empty()).then_some(v.as_str()))
            .collect();
        arrays.push(Arc::new(array));
    }
    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), arrays).context("building record batch")?;

    let parquet_path = "sample_events.parquet";
    let file = std::fs::File::create(parquet_path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;

    // CSV with the same content
    let csv_path = "sample_events.csv";
    let mut csv_writer = csv::Writer::from_path(csv_path).context("creating CSV file")?;
    csv_writer.write_record(HEADER).context("writing CSV header")?;
    for (r, id) in ids.iter().enumerate() {
        let mut record = vec![id.to_string()];
        record.extend(columns.iter().map(|col| col[r].clone()));
        csv_writer.write_record(&record).context("writing CSV row")?;
    }
    csv_writer.flush().context("flushing CSV")?;

    println!("Wrote {n_events} events ({} columns) to {parquet_path} and {csv_path}", HEADER.len());
    Ok(())
}
