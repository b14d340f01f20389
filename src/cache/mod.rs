//! 对象缓存模块
//!
//! 通过插件注册机制支持多种缓存后端（moka 内存缓存 / redis），
//! 运行时根据配置的 `cache.type` 选择实现。

pub mod object_cache;
pub mod register;
mod traits;

pub use traits::{CacheResult, ObjectCache};

use crate::config::AppConfig;
use crate::errors::{CFSystemError, Result};

/// 按配置创建对象缓存实例
pub async fn create_object_cache() -> Result<Box<dyn ObjectCache>> {
    let cache_type = AppConfig::get().cache.cache_type.clone();
    let constructor = register::get_object_cache_plugin(&cache_type).ok_or_else(|| {
        CFSystemError::cache_plugin_not_found(format!(
            "Object cache plugin '{cache_type}' is not registered"
        ))
    })?;
    constructor().await
}

/// 声明一个对象缓存插件，进程启动时自动注册
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $plugin:ty) => {
        paste::paste! {
            #[ctor::ctor]
            fn [<__register_object_cache_ $plugin:snake>]() {
                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    std::sync::Arc::new(|| {
                        Box::pin(async {
                            let cache = <$plugin>::new()
                                .map_err($crate::errors::CFSystemError::cache_connection)?;
                            Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                        })
                            as $crate::cache::register::BoxedObjectCacheFuture
                    }),
                );
            }
        }
    };
}
