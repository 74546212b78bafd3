//! Service wiring: one repository set, shared by every domain service.

use std::sync::Arc;

use tracing::info;

use barbermatch_auth::{AccountRepository, Argon2Hasher, Hs256Jwt, IdentityService, UserDirectory};
use barbermatch_booking::{
    AppointmentRepository, AppointmentService, BarbershopRepository, BarbershopService, HairstyleRepository,
    HairstyleService,
};
use barbermatch_infra::{
    InMemoryDatabase, LogNotifier, PostgresAccountStore, PostgresAnalysisStore, PostgresAppointmentStore,
    PostgresBarbershopStore, PostgresHairstyleStore, db,
};
use barbermatch_visagism::{AnalysisRepository, SimulatedFaceAnalyzer, VisagismService};

use crate::app::admin::AdminFacade;
use crate::config::{ApiConfig, Persistence};

pub struct AppServices {
    pub identity: IdentityService,
    pub users: Arc<UserDirectory>,
    pub appointments: Arc<AppointmentService>,
    pub barbershops: Arc<BarbershopService>,
    pub hairstyles: Arc<HairstyleService>,
    pub visagism: VisagismService,
    pub admin: AdminFacade,
}

struct Repositories {
    accounts: Arc<dyn AccountRepository>,
    appointments: Arc<dyn AppointmentRepository>,
    barbershops: Arc<dyn BarbershopRepository>,
    hairstyles: Arc<dyn HairstyleRepository>,
    analyses: Arc<dyn AnalysisRepository>,
}

pub async fn build_services(config: &ApiConfig, jwt: Arc<Hs256Jwt>) -> Result<AppServices, sqlx::Error> {
    let repos = match &config.persistence {
        Persistence::InMemory => {
            info!("using in-memory stores");
            in_memory_repositories()
        }
        Persistence::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = db::connect(database_url, *max_connections).await?;
            db::ensure_schema(&pool).await?;
            info!(max_connections, "using postgres stores");
            Repositories {
                accounts: Arc::new(PostgresAccountStore::new(pool.clone())),
                appointments: Arc::new(PostgresAppointmentStore::new(pool.clone())),
                barbershops: Arc::new(PostgresBarbershopStore::new(pool.clone())),
                hairstyles: Arc::new(PostgresHairstyleStore::new(pool.clone())),
                analyses: Arc::new(PostgresAnalysisStore::new(pool)),
            }
        }
    };

    let identity = IdentityService::new(repos.accounts.clone(), Arc::new(Argon2Hasher::new()), jwt)
        .with_token_ttl(config.token_ttl);
    let users = Arc::new(UserDirectory::new(repos.accounts));
    let appointments = Arc::new(AppointmentService::new(repos.appointments, Arc::new(LogNotifier)));
    let barbershops = Arc::new(BarbershopService::new(repos.barbershops));
    let hairstyles = Arc::new(HairstyleService::new(repos.hairstyles));
    let visagism = VisagismService::new(Arc::new(SimulatedFaceAnalyzer), repos.analyses, hairstyles.clone());
    let admin = AdminFacade::new(users.clone(), appointments.clone(), barbershops.clone());

    Ok(AppServices {
        identity,
        users,
        appointments,
        barbershops,
        hairstyles,
        visagism,
        admin,
    })
}

fn in_memory_repositories() -> Repositories {
    let db = InMemoryDatabase::new();
    Repositories {
        accounts: Arc::new(db.accounts()),
        appointments: Arc::new(db.appointments()),
        barbershops: Arc::new(db.barbershops()),
        hairstyles: Arc::new(db.hairstyles()),
        analyses: Arc::new(db.analyses()),
    }
}
