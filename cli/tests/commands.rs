//! Subcommands end-to-end over reqwest against the mock backend.

use bpjs_cli::{run, run_shell, Command, ReqwestTransport};
use bpjs_core::{BpjsApi, ServiceType, Session};
use mock_server::MockState;

async fn session() -> (Session<ReqwestTransport>, MockState) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = MockState::seeded();
    let served = state.clone();
    tokio::spawn(async move { mock_server::run_with_state(listener, served).await });

    let api = BpjsApi::new(&format!("http://{addr}/api"), ReqwestTransport::new().unwrap());
    (Session::new(api), state)
}

async fn output_of(session: &Session<ReqwestTransport>, command: Command) -> String {
    let mut out = Vec::new();
    run(session, command, &mut out).await.unwrap();
    String::from_utf8(out).unwrap()
}

#[tokio::test]
async fn peserta_prints_payload_json() {
    let (session, _) = session().await;

    let out = output_of(
        &session,
        Command::Peserta {
            nik: "3201010202020002".to_string(),
            tgl_sep: "2024-01-06".to_string(),
        },
    )
    .await;

    let payload: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(payload["peserta"]["nama"], "BUDI SANTOSO");
}

#[tokio::test]
async fn unknown_peserta_is_an_error() {
    let (session, _) = session().await;
    let mut out = Vec::new();

    let err = run(
        &session,
        Command::Peserta {
            nik: "1".to_string(),
            tgl_sep: "2024-01-06".to_string(),
        },
        &mut out,
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("not found"));
}

#[tokio::test]
async fn monitoring_prints_matching_visits() {
    let (session, _) = session().await;

    let out = output_of(
        &session,
        Command::Monitoring {
            tgl: "2024-01-06".to_string(),
            jenis: ServiceType::Outpatient,
        },
    )
    .await;

    let payload: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(payload["sep"][0]["noSep"], "0301R0010124V000003");
}

#[tokio::test]
async fn laporan_renders_rows_with_doctor_names() {
    let (session, _) = session().await;

    let out = output_of(
        &session,
        Command::Laporan {
            awal: "2024-01-01".to_string(),
            akhir: "2024-01-31".to_string(),
            force: false,
        },
    )
    .await;

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "2 antrean, 1 Jan 2024 s/d 31 Jan 2024");
    assert!(lines[1].starts_with("5 Jan 2024 | 20240105A001 | INT | dr. Andi, Sp.PD |"));
    assert!(lines[2].contains("| dr. Bella, Sp.JP |"));
}

#[tokio::test]
async fn dokter_lists_and_resolves_codes() {
    let (session, _) = session().await;

    let listing = output_of(&session, Command::Dokter { kode: None }).await;
    assert_eq!(listing, "D1\tdr. Andi, Sp.PD\nD2\tdr. Bella, Sp.JP\n");

    let unknown = output_of(
        &session,
        Command::Dokter {
            kode: Some("D9".to_string()),
        },
    )
    .await;
    assert_eq!(unknown, "D9\n");
}

#[tokio::test]
async fn shell_reuses_cached_report() {
    let (session, state) = session().await;
    let script = "\
# same range twice, then forced
laporan 2024-01-01 2024-01-31
laporan 2024-01-01 2024-01-31
laporan 2024-01-01 2024-01-31 --force
batal 20240105A001 \"dokter cuti mendadak\"
laporan 2024-02-01 2024-02-29
bogus
exit
laporan 2024-03-01 2024-03-31
";
    let mut out = Vec::new();

    run_shell(&session, script.as_bytes(), &mut out).await.unwrap();

    assert_eq!(state.report_hits(), 3);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("\"status\": \"Batal\""));
    assert!(text.contains("\"keterangan\": \"dokter cuti mendadak\""));
    assert!(text.contains("1 antrean, 1 Feb 2024 s/d 29 Feb 2024"));
    assert!(text.contains("unrecognized subcommand 'bogus'"));
}
