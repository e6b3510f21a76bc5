//! Seed data served by the mock backend.

use serde_json::{json, Value};

pub struct Fixtures {
    pub participants: Vec<Value>,
    pub visits: Vec<Value>,
    pub history: Vec<Value>,
    pub control_plans: Vec<Value>,
    pub queue: Vec<Value>,
    pub doctors: Vec<Value>,
}

impl Fixtures {
    pub fn seeded() -> Self {
        Self {
            participants: vec![
                json!({
                    "nik": "3201010101010001",
                    "noKartu": "0001234567890",
                    "nama": "SITI AMINAH",
                    "sex": "P",
                    "tglLahir": "1985-04-12",
                    "statusPeserta": { "kode": "0", "keterangan": "AKTIF" },
                    "jenisPeserta": { "kode": "14", "keterangan": "PEKERJA MANDIRI" },
                    "hakKelas": { "kode": "2", "keterangan": "KELAS II" }
                }),
                json!({
                    "nik": "3201010202020002",
                    "noKartu": "0009876543210",
                    "nama": "BUDI SANTOSO",
                    "sex": "L",
                    "tglLahir": "1972-11-30",
                    "statusPeserta": { "kode": "0", "keterangan": "AKTIF" },
                    "jenisPeserta": { "kode": "1", "keterangan": "PNS PUSAT" },
                    "hakKelas": { "kode": "1", "keterangan": "KELAS I" }
                }),
            ],
            visits: vec![
                json!({ "noSep": "0301R0010124V000001", "tglSep": "2024-01-05", "jnsPelayanan": "2", "noKartu": "0001234567890", "nama": "SITI AMINAH", "poli": "INT" }),
                json!({ "noSep": "0301R0010124V000002", "tglSep": "2024-01-05", "jnsPelayanan": "1", "noKartu": "0009876543210", "nama": "BUDI SANTOSO", "poli": "" }),
                json!({ "noSep": "0301R0010124V000003", "tglSep": "2024-01-06", "jnsPelayanan": "2", "noKartu": "0009876543210", "nama": "BUDI SANTOSO", "poli": "JAN" }),
            ],
            history: vec![
                json!({ "noKartu": "0001234567890", "noSep": "0301R0010124V000001", "tglSep": "2024-01-05", "poli": "PENYAKIT DALAM", "ppkPelayanan": "RS SEHAT" }),
                json!({ "noKartu": "0001234567890", "noSep": "0301R0010224V000010", "tglSep": "2024-02-12", "poli": "PENYAKIT DALAM", "ppkPelayanan": "RS SEHAT" }),
                json!({ "noKartu": "0009876543210", "noSep": "0301R0010124V000003", "tglSep": "2024-01-06", "poli": "JANTUNG", "ppkPelayanan": "RS SEHAT" }),
            ],
            control_plans: vec![
                json!({ "noSuratKontrol": "0301R0010124K000001", "noKartu": "0001234567890", "nama": "SITI AMINAH", "tglTerbitKontrol": "2024-01-05", "tglRencanaKontrol": "2024-02-05", "kodeDokter": "D1", "namaDokter": "dr. Andi, Sp.PD" }),
                json!({ "noSuratKontrol": "0301R0010124K000002", "noKartu": "0009876543210", "nama": "BUDI SANTOSO", "tglTerbitKontrol": "2024-01-06", "tglRencanaKontrol": "2024-01-20", "kodeDokter": "D2", "namaDokter": "dr. Bella, Sp.JP" }),
            ],
            queue: vec![
                json!({ "kodebooking": "20240105A001", "tanggal": "2024-01-05", "kodepoli": "INT", "kodedokter": "D1", "nik": "3201010101010001", "nokapst": "0001234567890", "sumberdata": "Mobile JKN", "status": "Selesai dilayani", "createdtime": 1704439800000_i64 }),
                json!({ "kodebooking": "20240120B002", "tanggal": "2024-01-20", "kodepoli": "JAN", "kodedokter": "D2", "nik": "3201010202020002", "nokapst": "0009876543210", "sumberdata": "Bridging Antrean", "status": "Belum dilayani", "createdtime": 1705710600000_i64 }),
                json!({ "kodebooking": "20240205A003", "tanggal": "2024-02-05", "kodepoli": "INT", "kodedokter": "D1", "nik": "3201010101010001", "nokapst": "0001234567890", "sumberdata": "Mobile JKN", "status": "Belum dilayani", "createdtime": 1707091200000_i64 }),
            ],
            doctors: vec![
                json!({ "kodedokter": "D1", "namadokter": "dr. Andi, Sp.PD", "kodepoli": "INT" }),
                json!({ "vc_nid_bpjs": "D2", "dokter": "dr. Bella, Sp.JP", "poli": "JAN" }),
            ],
        }
    }
}
