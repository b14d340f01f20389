use crate::cache::{ObjectCache, register::get_object_cache_plugin};
use crate::config::AppConfig;
use crate::models::general_feedback::entities::FeedbackCategory;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

/// 创建缓存实例
async fn create_cache() -> Result<Arc<dyn ObjectCache>, Box<dyn std::error::Error>> {
    let config = AppConfig::get();
    let cache_type = &config.cache.cache_type;

    warn!("Attempting to create {} cache backend", cache_type);

    // 根据配置选择缓存后端
    if let Some(constructor) = get_object_cache_plugin(cache_type) {
        match constructor().await {
            Ok(cache) => {
                warn!("Successfully created {} cache backend", cache_type);
                return Ok(Arc::from(cache));
            }
            Err(e) => {
                warn!("Failed to create {} cache: {}", cache_type, e);

                // 如果配置的缓存失败，尝试回退策略
                if cache_type == "redis" {
                    warn!("Falling back to memory cache");
                    if let Some(fallback_constructor) = get_object_cache_plugin("moka") {
                        match fallback_constructor().await {
                            Ok(cache) => {
                                warn!(
                                    "Successfully created fallback Moka (in-memory) cache backend"
                                );
                                return Ok(Arc::from(cache));
                            }
                            Err(fallback_e) => {
                                warn!("Failed to create fallback Moka cache: {}", fallback_e);
                            }
                        }
                    }
                }
            }
        }
    } else {
        warn!("Cache backend '{}' not found in registry", cache_type);

        // 如果找不到配置的缓存类型，尝试默认的内存缓存
        if cache_type != "moka" {
            warn!("Falling back to default memory cache");
            if let Some(fallback_constructor) = get_object_cache_plugin("moka") {
                match fallback_constructor().await {
                    Ok(cache) => {
                        warn!("Successfully created fallback Moka (in-memory) cache backend");
                        return Ok(Arc::from(cache));
                    }
                    Err(fallback_e) => {
                        warn!("Failed to create fallback Moka cache: {}", fallback_e);
                    }
                }
            }
        }
    }

    Err(format!("No cache backend available (tried: {cache_type})").into())
}

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// 初始化默认管理员账号
/// 如果数据库中没有 admin 用户，则创建一个
async fn seed_admin(storage: &Arc<dyn Storage>) {
    match storage.get_user_by_username("admin").await {
        Ok(Some(_)) => {
            debug!("Admin account already exists, skipping seed");
            return;
        }
        Ok(None) => {
            info!("No admin account found, creating default admin...");
        }
        Err(e) => {
            warn!("Failed to check admin account: {}, skipping seed", e);
            return;
        }
    }

    // 获取密码：优先从环境变量，否则生成随机密码
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping seed", e);
            return;
        }
    };

    let admin_request = CreateUserRequest {
        username: "admin".to_string(),
        password: password_hash,
        role: UserRole::Admin,
        incharge_category: None,
    };

    match storage.create_user(admin_request).await {
        Ok(user) => {
            info!(
                "Default admin account created successfully (ID: {}, username: {})",
                user.id, user.username
            );
        }
        Err(e) => {
            warn!("Failed to create admin account: {}", e);
        }
    }
}

/// 初始化类别负责人账号
/// 每个可配置负责人的类别一个账号，已存在的跳过
async fn seed_incharges(storage: &Arc<dyn Storage>) {
    for category in FeedbackCategory::incharge_categories() {
        let username = format!("{category}_incharge");

        match storage.get_user_by_username(&username).await {
            Ok(Some(_)) => continue,
            Ok(None) => {}
            Err(e) => {
                warn!("Failed to check incharge account {}: {}", username, e);
                continue;
            }
        }

        let password = std::env::var("INCHARGE_PASSWORD").unwrap_or_else(|_| {
            let pwd = generate_random_password(16);
            warn!("Generated password for {}: {}", username, pwd);
            pwd
        });

        let password_hash = match hash_password(&password) {
            Ok(hash) => hash,
            Err(e) => {
                warn!("Failed to hash incharge password: {}", e);
                continue;
            }
        };

        let request = CreateUserRequest {
            username: username.clone(),
            password: password_hash,
            role: UserRole::Incharge,
            incharge_category: Some(category.clone()),
        };

        match storage.create_user(request).await {
            Ok(user) => info!("Incharge account {} created (ID: {})", user.username, user.id),
            Err(e) => warn!("Failed to create incharge account {}: {}", username, e),
        }
    }
}

/// 默认问卷题目
const DEFAULT_QUESTIONS: &[&str] = &[
    "Punctuality and regularity of the staff",
    "Preparation and organisation of the lecture",
    "Clarity of explanation and communication",
    "Coverage of the syllabus at an appropriate pace",
    "Use of examples and illustrations to aid understanding",
    "Encouragement of questions and student interaction",
    "Use of teaching aids (board, slides, demonstrations)",
    "Availability and guidance outside class hours",
    "Fairness in evaluation of tests and assignments",
    "Timely return of evaluated answer scripts",
    "Ability to motivate and sustain interest in the subject",
    "Command over the subject",
    "Linking the subject with applications and practice",
    "Conduct of tutorials and problem solving sessions",
    "Overall effectiveness of the staff member",
];

/// 初始化默认问卷题库，仅在题库为空时写入
async fn seed_questions(storage: &Arc<dyn Storage>) {
    match storage.count_questions().await {
        Ok(0) => {
            info!("Question bank is empty, seeding default questions...");
        }
        Ok(count) => {
            debug!("Question bank already has {} question(s), skipping seed", count);
            return;
        }
        Err(e) => {
            warn!("Failed to count questions: {}, skipping seed", e);
            return;
        }
    }

    for text in DEFAULT_QUESTIONS {
        if let Err(e) = storage.create_question(text).await {
            warn!("Failed to seed question '{}': {}", text, e);
        }
    }

    info!("Seeded {} default questions", DEFAULT_QUESTIONS.len());
}

/// 准备服务器启动的上下文
/// 包括存储、缓存和初始数据
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
        debug!("Debug mode: Cache registry is enabled");
    }

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    // 初始账号与题库
    seed_admin(&storage).await;
    seed_incharges(&storage).await;
    seed_questions(&storage).await;

    // 创建缓存实例
    let cache = create_cache().await.expect("Failed to create cache");
    warn!("Cache backend initialized");

    StartupContext { storage, cache }
}
