use presenced::{api, db, verify};

#[derive(Debug, thiserror::Error)]
enum ServerError {
    #[error("Failed to connect to database")]
    DatabaseInitError(#[from] db::NewSystemError),
    #[error("Failed to bind listen socket")]
    BindError(#[source] std::io::Error),
    #[error("Failed to run server")]
    RunError(#[source] std::io::Error),
}

struct StaticDirPath(std::path::PathBuf);

impl From<std::path::PathBuf> for StaticDirPath {
    fn from(path: std::path::PathBuf) -> Self {
        Self(path)
    }
}

impl std::ops::Deref for StaticDirPath {
    type Target = std::path::Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

async fn index(
    static_dir_path: actix_web::web::Data<StaticDirPath>,
) -> actix_web::Result<actix_files::NamedFile> {
    Ok(actix_files::NamedFile::open(
        static_dir_path.join("index.html"),
    )?)
}

async fn run(
    db_file_path: std::path::PathBuf,
    static_dir_path: std::path::PathBuf,
    verification_delay: std::time::Duration,
    host: &str,
    port: u16,
) -> Result<(), ServerError> {
    let db = db::System::new(&db_file_path)?;

    let verifier = verify::Verifier::new(std::sync::Arc::new(verify::MockFaceVerifier::new(
        verification_delay,
    )));

    actix_web::HttpServer::new(move || {
        actix_web::App::new()
            .data(db.clone())
            .data(verifier.clone())
            .data(StaticDirPath::from(static_dir_path.clone()))
            .service(actix_web::web::scope("/api").configure(api::configure))
            .service(actix_files::Files::new("/static", static_dir_path.clone()))
            .default_service(actix_web::web::to(index))
    })
    .bind((host, port))
    .map_err(|err| ServerError::BindError(err))?
    .run()
    .await
    .map_err(|err| ServerError::RunError(err))
}

#[derive(structopt::StructOpt)]
struct CliOptions {
    #[structopt(long, default_value = "/var/lib/presence/presence.db")]
    db_file_path: std::path::PathBuf,
    #[structopt(long, default_value = "/usr/local/share/presence/www")]
    static_dir_path: std::path::PathBuf,
    /// How long the mock face verifier pretends to work, in milliseconds.
    #[structopt(long, default_value = "3000")]
    verification_delay_ms: u64,
    #[structopt(short, long, default_value = "0.0.0.0")]
    host: String,
    #[structopt(short, long, default_value = "80")]
    port: u16,
}

#[actix_web::main]
async fn main() {
    use structopt::StructOpt;

    env_logger::init_from_env(env_logger::Env::new().filter("PRESENCED_LOG"));

    let cli_options = CliOptions::from_args();

    if let Err(error) = run(
        cli_options.db_file_path,
        cli_options.static_dir_path,
        std::time::Duration::from_millis(cli_options.verification_delay_ms),
        &cli_options.host,
        cli_options.port,
    )
    .await
    {
        use std::error::Error;

        println!("Error: {}", error);

        let mut current = error.source();
        if current.is_some() {
            println!("");
            println!("Caused by:");
            while let Some(error) = current {
                println!("  {}", error);
                current = error.source();
            }
        }
    }
}
