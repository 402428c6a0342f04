use gestor_client::forms::{ProductField, ProductForm, RegisterField, RegisterForm};
use gestor_client::models::{Product, ProductUpdate};
use gestor_client::product_page::MSG_EMPTY;
use gestor_client::{ApiClient, AuthSession, FileStorage, ProductPage, ProductView};

use crate::cli::{Cli, Commands, ProductCommands};
use crate::{Error, Result};

type Session = AuthSession<FileStorage>;

pub async fn dispatch(args: Cli) -> Result<()> {
    if let Commands::Version = args.command {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let mut session = open_session(&args)?;

    match args.command {
        Commands::Version => {}
        Commands::Register {
            name,
            email,
            password,
        } => {
            let mut form = RegisterForm::new();
            form.set(RegisterField::Name, &name);
            form.set(RegisterField::Email, &email);
            form.set(RegisterField::Password, &password);
            let Some(registration) = form.submit() else {
                let fields = [RegisterField::Name, RegisterField::Email, RegisterField::Password];
                return Err(Error::InvalidInput(
                    fields
                        .into_iter()
                        .filter_map(|f| form.error(f).map(str::to_string))
                        .collect(),
                ));
            };
            let user = session.register(&registration).await?;
            println!("Cuenta creada. Sesión iniciada como {} <{}>", user.name, user.email);
        }
        Commands::Login { email, password } => {
            let user = session.try_login(&email, &password).await?;
            println!("Sesión iniciada como {} <{}>", user.name, user.email);
        }
        Commands::Logout => {
            session.logout();
            println!("Sesión cerrada");
        }
        Commands::Whoami => {
            let user = session.user().ok_or(Error::NotSignedIn)?;
            println!("{} <{}> ({})", user.name, user.email, user.id);
        }
        Commands::Products(cmd) => products(&session, cmd).await?,
    }

    Ok(())
}

fn open_session(args: &Cli) -> Result<Session> {
    let dir = args
        .session_dir
        .clone()
        .or_else(FileStorage::default_dir)
        .ok_or_else(|| Error::Custom("No se pudo determinar el directorio de sesión".into()))?;
    log::debug!("session dir: {}", dir.display());
    let api = ApiClient::new(&args.api_url)?;
    Ok(AuthSession::hydrate(api, FileStorage::new(dir)))
}

async fn products(session: &Session, cmd: ProductCommands) -> Result<()> {
    match cmd {
        ProductCommands::Show { id } => {
            let product = session.api().get_product(&id).await?;
            print_detail(&product);
            return Ok(());
        }
        ProductCommands::Add {
            name,
            price,
            description,
        } => {
            let mut form = ProductForm::new();
            form.set(ProductField::Name, &name);
            form.set(ProductField::Price, &price);
            form.set(ProductField::Description, &description);
            let Some(product) = form.submit() else {
                let fields = [ProductField::Name, ProductField::Price, ProductField::Description];
                return Err(Error::InvalidInput(
                    fields
                        .into_iter()
                        .filter_map(|f| form.error(f).map(str::to_string))
                        .collect(),
                ));
            };
            let mut page = signed_in_page(session)?;
            if !page.add_product(session, &product).await {
                return Err(page_error(&page));
            }
            if let Some(created) = page.products().last() {
                println!("Producto agregado: {}", created.id);
            }
        }
        ProductCommands::List => {
            let mut page = signed_in_page(session)?;
            page.mount(session).await;
            if page.error().is_some() {
                return Err(page_error(&page));
            }
            match page.view() {
                ProductView::Table(rows) => print_table(rows),
                ProductView::Empty | ProductView::Loading => println!("{MSG_EMPTY}"),
            }
        }
        ProductCommands::Update {
            id,
            name,
            price,
            description,
        } => {
            let update = ProductUpdate {
                name,
                price,
                description,
            };
            let token = session.token().ok_or(Error::NotSignedIn)?;
            let product = session.api().update_product(&token, &id, &update).await?;
            print_detail(&product);
        }
        ProductCommands::Delete { id } => {
            let token = session.token().ok_or(Error::NotSignedIn)?;
            let message = session.api().delete_product(&token, &id).await?;
            println!("{message}");
        }
    }
    Ok(())
}

fn signed_in_page(session: &Session) -> Result<ProductPage> {
    if session.token().is_none() {
        return Err(Error::NotSignedIn);
    }
    Ok(ProductPage::new())
}

fn page_error(page: &ProductPage) -> Error {
    Error::Custom(page.error().unwrap_or("Error desconocido").to_string())
}

fn print_table(rows: &[Product]) {
    let name_w = rows
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("NOMBRE".len());
    println!("{:<36}  {:<name_w$}  {:>10}  DESCRIPCIÓN", "ID", "NOMBRE", "PRECIO");
    for p in rows {
        println!(
            "{:<36}  {:<name_w$}  {:>10.2}  {}",
            p.id, p.name, p.price, p.description
        );
    }
}

fn print_detail(p: &Product) {
    println!("ID:          {}", p.id);
    println!("Nombre:      {}", p.name);
    println!("Precio:      {:.2}", p.price);
    println!("Descripción: {}", p.description);
    if let Some(owner) = &p.user {
        println!("Propietario: {owner}");
    }
    if let Some(updated) = p.updated_at {
        println!("Actualizado: {}", updated.to_rfc3339());
    }
}
