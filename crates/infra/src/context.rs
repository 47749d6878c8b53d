//! # コンテキスト
//!
//! 起動時に組み立てた設定や実装を保持し、呼び出し元へ明示的に受け渡すための
//! 型付きレジストリ。
//!
//! ## 設計方針
//!
//! - **不変**: [`Context::with_value`] は元のコンテキストを変更せず、値を追加した
//!   派生コンテキストを返す。共有されたコンテキストを書き換えないためロック不要
//! - **キーの衝突防止**: キーはモジュール内に閉じた型（[`ContextKey`] の実装）で
//!   表現し、`TypeId` で識別する。他モジュールが同じキーを作ることはできない
//! - **注入関数**: [`Injector`] はコンテキストを受け取り派生コンテキストを返す関数、
//!   [`Releaser`] は初期化と対になる解放処理

use std::{
    any::{Any, TypeId},
    collections::HashMap,
    fmt,
    sync::Arc,
};

/// コンテキストに格納する値のキー
///
/// 実装する型そのものがキーとなる。値の型は関連型で固定する。
pub trait ContextKey: 'static {
    type Value: Send + Sync + 'static;
}

/// 型付きの不変レジストリ
///
/// `Clone` は内部の `Arc` を複製するだけで、格納された値は共有される。
#[derive(Clone, Default)]
pub struct Context {
    values: Arc<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl Context {
    /// 空のコンテキストを作成する
    pub fn new() -> Self {
        Self::default()
    }

    /// キー `K` に値を結び付けた派生コンテキストを返す
    ///
    /// 同じキーの値が既にあれば、派生コンテキスト側でのみ上書きされる。
    pub fn with_value<K: ContextKey>(&self, value: K::Value) -> Self {
        let mut values = HashMap::clone(&self.values);
        values.insert(TypeId::of::<K>(), Arc::new(value));
        Self {
            values: Arc::new(values),
        }
    }

    /// キー `K` の値を取得する
    pub fn value<K: ContextKey>(&self) -> Option<&K::Value> {
        self.values
            .get(&TypeId::of::<K>())
            .and_then(|value| value.downcast_ref())
    }

    /// キー `K` の値が格納されているか
    pub fn contains<K: ContextKey>(&self) -> bool {
        self.values.contains_key(&TypeId::of::<K>())
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("len", &self.values.len())
            .finish()
    }
}

/// コンテキストに値を注入する関数
///
/// 何度呼び出しても同じ値を注入する（シングルトン注入）。
pub struct Injector(Box<dyn Fn(&Context) -> Context + Send + Sync>);

impl Injector {
    pub fn new(f: impl Fn(&Context) -> Context + Send + Sync + 'static) -> Self {
        Self(Box::new(f))
    }

    /// キー `K` に常に同じ値を結び付ける注入関数を作成する
    pub fn singleton<K: ContextKey>(value: K::Value) -> Self
    where
        K::Value: Clone,
    {
        Self::new(move |ctx| ctx.with_value::<K>(value.clone()))
    }

    /// 派生コンテキストを返す
    pub fn inject(&self, ctx: &Context) -> Context {
        (self.0)(ctx)
    }
}

impl fmt::Debug for Injector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Injector")
    }
}

/// 初期化と対になる解放処理
pub struct Releaser(Box<dyn FnOnce() + Send>);

impl Releaser {
    pub fn new(f: impl FnOnce() + Send + 'static) -> Self {
        Self(Box::new(f))
    }

    /// 何もしない解放処理
    pub fn noop() -> Self {
        Self::new(|| {})
    }

    /// 解放処理を実行する
    pub fn release(self) {
        (self.0)();
    }
}

impl fmt::Debug for Releaser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Releaser")
    }
}
