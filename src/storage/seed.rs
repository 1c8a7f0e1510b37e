//! Startup content for a fresh store

use crate::auth::ADMIN_ROLE;
use crate::storage::collection::Collection;
use crate::storage::record::{Record, ID_FIELD};
use crate::storage::store::Store;
use serde_json::{json, Value};
use tracing::{info, warn};

/// The seeded administrator. The password is already hashed.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    /// Login email
    pub email: String,
    /// bcrypt hash of the admin password
    pub password_hash: String,
}

/// Fill `store` with the admin user and the sample portfolio content.
///
/// Seed records keep fixed ids (`project-1`, `skill-1`, ...) so links from
/// the frontend stay stable across restarts.
pub fn populate(store: &Store, admin: &AdminAccount) {
    insert_all(
        store,
        Collection::Users,
        vec![json!({
            "id": "user-1",
            "email": admin.email,
            "password": admin.password_hash,
            "role": ADMIN_ROLE,
        })],
    );
    insert_all(store, Collection::Projects, projects());
    insert_all(store, Collection::Skills, skills());
    insert_all(store, Collection::Experience, experience());
    insert_all(store, Collection::Services, services());

    store.set_profile(object(profile()));

    store.update_analytics(object(json!({
        "pageViews": 1250,
        "uniqueVisitors": 890,
        "projectViews": [],
    })));

    info!(
        projects = store.count(Collection::Projects),
        skills = store.count(Collection::Skills),
        experience = store.count(Collection::Experience),
        services = store.count(Collection::Services),
        "Store seeded"
    );
}

fn insert_all(store: &Store, collection: Collection, records: Vec<Value>) {
    for value in records {
        let record = object(value);
        let id = record.get_str(ID_FIELD).unwrap_or_default().to_string();
        if let Err(e) = store.create(collection, record) {
            warn!(collection = %collection, id = %id, "Skipping seed record: {}", e);
        }
    }
}

fn object(value: Value) -> Record {
    match value {
        Value::Object(map) => Record::from(map),
        _ => Record::new(),
    }
}

fn projects() -> Vec<Value> {
    vec![
        json!({
            "id": "project-1",
            "title": "E-Commerce Platform",
            "description": "Full-stack storefront with cart, checkout and an order dashboard.",
            "technologies": ["React", "Node.js", "PostgreSQL", "Stripe"],
            "category": "web",
            "featured": true,
            "githubUrl": "https://github.com/example/ecommerce-platform",
            "liveUrl": "https://shop.example.com",
            "imageUrl": "https://images.example.com/projects/ecommerce.png",
        }),
        json!({
            "id": "project-2",
            "title": "Task Management App",
            "description": "Collaborative kanban board with real-time updates.",
            "technologies": ["TypeScript", "Next.js", "WebSockets"],
            "category": "web",
            "featured": true,
            "githubUrl": "https://github.com/example/task-manager",
            "liveUrl": "https://tasks.example.com",
            "imageUrl": "https://images.example.com/projects/tasks.png",
        }),
        json!({
            "id": "project-3",
            "title": "Weather CLI",
            "description": "Command line forecast client with offline caching.",
            "technologies": ["Rust", "Tokio"],
            "category": "tooling",
            "featured": false,
            "githubUrl": "https://github.com/example/weather-cli",
        }),
    ]
}

fn skills() -> Vec<Value> {
    vec![
        json!({ "id": "skill-1", "name": "React", "category": "frontend", "level": 90, "icon": "react" }),
        json!({ "id": "skill-2", "name": "TypeScript", "category": "frontend", "level": 85, "icon": "typescript" }),
        json!({ "id": "skill-3", "name": "Node.js", "category": "backend", "level": 85, "icon": "nodejs" }),
        json!({ "id": "skill-4", "name": "Rust", "category": "backend", "level": 70, "icon": "rust" }),
        json!({ "id": "skill-5", "name": "PostgreSQL", "category": "database", "level": 80, "icon": "postgresql" }),
        json!({ "id": "skill-6", "name": "Docker", "category": "devops", "level": 75, "icon": "docker" }),
    ]
}

fn experience() -> Vec<Value> {
    vec![
        json!({
            "id": "experience-1",
            "company": "Tech Solutions Inc.",
            "position": "Senior Full Stack Developer",
            "startDate": "2021-03-01",
            "endDate": null,
            "current": true,
            "description": "Lead development of customer-facing web applications.",
            "location": "Remote",
        }),
        json!({
            "id": "experience-2",
            "company": "Digital Agency Co.",
            "position": "Frontend Developer",
            "startDate": "2018-06-01",
            "endDate": "2021-02-28",
            "current": false,
            "description": "Built responsive sites and design systems for agency clients.",
            "location": "Lisbon, Portugal",
        }),
    ]
}

fn services() -> Vec<Value> {
    vec![
        json!({
            "id": "service-1",
            "title": "Web Development",
            "description": "Custom web applications from prototype to production.",
            "icon": "code",
            "price": 5000,
            "features": ["Responsive design", "API integration", "Deployment"],
        }),
        json!({
            "id": "service-2",
            "title": "Technical Consulting",
            "description": "Architecture reviews and performance audits.",
            "icon": "lightbulb",
            "price": 150,
            "features": ["Code review", "Architecture planning"],
        }),
    ]
}

fn profile() -> Value {
    json!({
        "name": "Alex Morgan",
        "title": "Full Stack Developer",
        "bio": "I build fast, accessible web applications and the APIs behind them.",
        "email": "hello@example.com",
        "location": "Lisbon, Portugal",
        "avatar": "https://images.example.com/avatar.png",
        "socialLinks": {
            "github": "https://github.com/example",
            "linkedin": "https://linkedin.com/in/example",
            "twitter": "https://twitter.com/example",
        },
    })
}
