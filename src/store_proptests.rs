use super::*;
use crate::storage::MemoryStorage;
use proptest::prelude::*;

/// 価格（セント単位で生成して小数の誤差を避ける）
fn price_strategy() -> impl Strategy<Value = f64> {
    (0u32..100_000).prop_map(|cents| f64::from(cents) / 100.0)
}

/// 任意の有効な価格（セント単位に限らない）
fn any_price_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        price_strategy(),
        any::<f64>().prop_filter("finite and non-negative", |p| p.is_finite() && *p >= 0.0),
    ]
}

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9 ]{0,15}".prop_map(|s| s)
}

fn new_gift_strategy() -> impl Strategy<Value = NewGift> {
    (
        name_strategy(),
        name_strategy(),
        any_price_strategy(),
        prop::option::of(any_price_strategy()),
        prop::option::of("[ -~]{0,30}"),
        prop::option::of(name_strategy()),
        prop::option::of("20[0-9]{2}-[01][0-9]-[0-3][0-9]"),
    )
        .prop_map(
            |(name, recipient, price, target_price, notes, occasion, due_date)| NewGift {
                name,
                recipient,
                price,
                target_price,
                notes,
                occasion,
                due_date,
            },
        )
}

/// 追加するギフトと、その後の価格変更・購入フラグ
fn gift_plan_strategy() -> impl Strategy<Value = (NewGift, Vec<f64>, bool)> {
    (
        new_gift_strategy(),
        prop::collection::vec(any_price_strategy(), 0..4),
        any::<bool>(),
    )
}

#[derive(Debug, Clone)]
enum Op {
    Add(f64),
    Delete(usize),
    Reprice(usize, f64),
    Toggle(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        price_strategy().prop_map(Op::Add),
        any::<usize>().prop_map(Op::Delete),
        (any::<usize>(), price_strategy()).prop_map(|(i, p)| Op::Reprice(i, p)),
        any::<usize>().prop_map(Op::Toggle),
    ]
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

fn cents(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

proptest! {
    /// 価格変更のたびに履歴が 1 件ずつ増え、末尾が現在価格と一致する
    #[test]
    fn prop_price_history_grows_by_one_per_update(
        initial in price_strategy(),
        updates in prop::collection::vec(price_strategy(), 0..12)
    ) {
        block_on(async {
            let store = ListStore::open(MemoryStorage::new(), DEFAULT_STORAGE_KEY).await.unwrap();
            let list = store.create_list("List", "").await.unwrap();
            let gift = store
                .add_gift(&list.id, NewGift::new("Gift", "Someone", initial))
                .await
                .unwrap();
            prop_assert_eq!(gift.price_history().len(), 1);
            prop_assert_eq!(gift.price_history()[0].price, initial);

            for (i, price) in updates.iter().enumerate() {
                let updated = store.update_price(&list.id, &gift.id, *price).await.unwrap();
                prop_assert_eq!(updated.price_history().len(), i + 2);
                prop_assert_eq!(updated.price_history().last().unwrap().price, updated.price);
            }
            Ok(())
        })?;
    }

    /// 予算は常に現在のギフトから再計算される
    #[test]
    fn prop_total_budget_matches_current_gifts(
        ops in prop::collection::vec(op_strategy(), 0..30)
    ) {
        block_on(async {
            let store = ListStore::open(MemoryStorage::new(), DEFAULT_STORAGE_KEY).await.unwrap();
            let list = store.create_list("List", "").await.unwrap();

            for op in ops {
                let gifts = store.list(&list.id).unwrap().gifts;
                let pick = |i: usize| gifts.get(i % gifts.len().max(1)).map(|g| g.id.clone());
                match op {
                    Op::Add(price) => {
                        store.add_gift(&list.id, NewGift::new("Gift", "Someone", price)).await.unwrap();
                    }
                    Op::Delete(i) => {
                        if let Some(id) = pick(i) {
                            store.delete_gift(&list.id, &id).await.unwrap();
                        }
                    }
                    Op::Reprice(i, price) => {
                        if let Some(id) = pick(i) {
                            store.update_price(&list.id, &id, price).await.unwrap();
                        }
                    }
                    Op::Toggle(i) => {
                        if let Some(id) = pick(i) {
                            store.toggle_purchased(&list.id, &id).await.unwrap();
                        }
                    }
                }

                let expected: i64 = store
                    .list(&list.id)
                    .unwrap()
                    .gifts
                    .iter()
                    .map(|g| cents(g.price))
                    .sum();
                prop_assert_eq!(cents(store.total_budget(&list.id).unwrap()), expected);
            }
            Ok(())
        })?;
    }

    /// 保存内容から開き直すと同じコレクションになる
    #[test]
    fn prop_reopen_reproduces_collection(
        lists in prop::collection::vec(
            (name_strategy(), name_strategy(), prop::collection::vec(gift_plan_strategy(), 0..4)),
            0..4
        )
    ) {
        block_on(async {
            let storage = MemoryStorage::new();
            let store = ListStore::open(storage.clone(), DEFAULT_STORAGE_KEY).await.unwrap();

            for (name, occasion, gifts) in &lists {
                let list = store.create_list(name, occasion).await.unwrap();
                for (input, reprices, purchased) in gifts {
                    let gift = store.add_gift(&list.id, input.clone()).await.unwrap();
                    for price in reprices {
                        store.update_price(&list.id, &gift.id, *price).await.unwrap();
                    }
                    if *purchased {
                        store.toggle_purchased(&list.id, &gift.id).await.unwrap();
                    }
                }
            }

            let reopened = ListStore::open(storage, DEFAULT_STORAGE_KEY).await.unwrap();
            let reloaded = reopened.snapshot();
            let original = store.snapshot();
            prop_assert_eq!(&*reloaded, &*original);

            for (list, reloaded_list) in original.iter().zip(reloaded.iter()) {
                for (gift, reloaded_gift) in list.gifts.iter().zip(&reloaded_list.gifts) {
                    prop_assert_eq!(gift.price.to_bits(), reloaded_gift.price.to_bits());
                    prop_assert_eq!(gift.price_history(), reloaded_gift.price_history());
                }
            }
            Ok(())
        })?;
    }
}
