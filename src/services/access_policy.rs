//! 服务端角色校验
//!
//! - waiter: 只能查看/推进/编辑自己创建的订单，编辑时不能修改状态
//! - bartender: 只能推进 Chờ Xác Nhận / Chờ Món 的订单，不能结账
//! - 其他角色不受限制
//!
//! 状态检查总是先于角色检查执行，调用方需先校验状态再调用这里。

use crate::entities::{OrderStatus, order_entity};
use crate::error::{AppError, AppResult};
use crate::models::{Actor, StaffRole};

fn ensure_owner(actor: &Actor, order: &order_entity::Model, action: &str) -> AppResult<()> {
    if order.staff_id != actor.staff_id {
        return Err(AppError::AuthError(format!(
            "Waiters can only {action} their own orders"
        )));
    }
    Ok(())
}

pub fn ensure_can_view(actor: &Actor, order: &order_entity::Model) -> AppResult<()> {
    match actor.role {
        StaffRole::Waiter => ensure_owner(actor, order, "view"),
        _ => Ok(()),
    }
}

pub fn ensure_can_advance(actor: &Actor, order: &order_entity::Model) -> AppResult<()> {
    match actor.role {
        StaffRole::Waiter => ensure_owner(actor, order, "advance"),
        StaffRole::Bartender => match order.status {
            OrderStatus::Pending | OrderStatus::AwaitingKitchen => Ok(()),
            current => Err(AppError::AuthError(format!(
                "Bartenders cannot advance orders in status {current}"
            ))),
        },
        StaffRole::Other(_) => Ok(()),
    }
}

pub fn ensure_can_edit(
    actor: &Actor,
    order: &order_entity::Model,
    target: OrderStatus,
) -> AppResult<()> {
    match actor.role {
        StaffRole::Waiter => {
            ensure_owner(actor, order, "edit")?;
            if target != order.status {
                return Err(AppError::AuthError(
                    "Waiters cannot change order status when editing".to_string(),
                ));
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

pub fn ensure_can_settle(actor: &Actor) -> AppResult<()> {
    match actor.role {
        StaffRole::Bartender => Err(AppError::AuthError(
            "Bartenders cannot settle tables".to_string(),
        )),
        _ => Ok(()),
    }
}
