use std::path::Path;
use std::sync::mpsc;

use assert_cmd::Command;
use gestor_api::{AppState, config::ApiConfig};
use predicates::prelude::*;

/// Serve the API with the in-memory store on a background thread.
fn spawn_api() -> String {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async move {
            let config = ApiConfig {
                bind_addr: "127.0.0.1:0".into(),
                database_url: String::new(),
                jwt_secret: "cli-test-secret".into(),
                cors_origins: Vec::new(),
            };
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, gestor_api::router(AppState::in_memory(config)))
                .await
                .unwrap();
        });
    });
    let addr = rx.recv().unwrap();
    format!("http://{addr}/api")
}

fn gestor(api: &str, session: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gestor").unwrap();
    cmd.env("GESTOR_API_URL", api)
        .env("GESTOR_SESSION_DIR", session)
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn version_prints_package() {
    Command::cargo_bin("gestor")
        .unwrap()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gestor_cli"));
}

#[test]
fn whoami_without_session_fails() {
    let tmp = tempfile::tempdir().unwrap();
    gestor("http://127.0.0.1:9/api", tmp.path())
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No hay sesión activa"));
}

#[test]
fn products_list_without_session_fails() {
    let tmp = tempfile::tempdir().unwrap();
    gestor("http://127.0.0.1:9/api", tmp.path())
        .args(["products", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No hay sesión activa"));
}

#[test]
fn register_rejects_weak_password_before_sending() {
    let tmp = tempfile::tempdir().unwrap();
    gestor("http://127.0.0.1:9/api", tmp.path())
        .args(["register", "--name", "Ana", "--email", "ana@example.com"])
        .args(["--password", "secret"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "La contraseña debe contener al menos un número",
        ));
}

#[test]
fn add_rejects_absurd_price_before_sending() {
    let tmp = tempfile::tempdir().unwrap();
    gestor("http://127.0.0.1:9/api", tmp.path())
        .args(["products", "add", "--name", "Silla", "--price", "99999"])
        .args(["--description", "Roble"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("máximo 50,000"));
}

#[test]
fn full_session_against_live_api() {
    let api = spawn_api();
    let tmp = tempfile::tempdir().unwrap();
    let session = tmp.path();

    gestor(&api, session)
        .args(["register", "--name", "Ana", "--email", "ana@example.com"])
        .args(["--password", "Secret1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ana@example.com"));

    gestor(&api, session)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ana <ana@example.com>"));

    gestor(&api, session)
        .args(["products", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No hay productos registrados."));

    let out = gestor(&api, session)
        .args(["products", "add", "--name", "Silla", "--price", "49.90"])
        .args(["--description", "Silla de roble"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let out = String::from_utf8(out).unwrap();
    let id = out
        .trim()
        .strip_prefix("Producto agregado: ")
        .unwrap()
        .to_string();

    gestor(&api, session)
        .args(["products", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Silla").and(predicate::str::contains("49.90")));

    gestor(&api, session)
        .args(["products", "update", &id, "--price", "55"])
        .assert()
        .success()
        .stdout(predicate::str::contains("55.00"));

    gestor(&api, session)
        .args(["products", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Silla de roble"));

    gestor(&api, session)
        .args(["products", "delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Producto eliminado"));

    gestor(&api, session)
        .args(["products", "show", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error 404: Producto no encontrado"));

    gestor(&api, session).arg("logout").assert().success();

    gestor(&api, session)
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No hay sesión activa"));

    gestor(&api, session)
        .args(["login", "--email", "ana@example.com", "--password", "wrong1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "El correo o la contraseña son incorrectos",
        ));
}
