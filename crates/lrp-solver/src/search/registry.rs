// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Symbolic operator identifiers. Catalogs in the parameter record name
//! operators by these strings; anything unknown is a configuration error.

use crate::{
    err::ConfigError,
    search::{
        destroy::{RemovalOp, RemovalPolicy, RemovalTarget},
        local::LocalOp,
        repair::InsertionOp,
    },
};

pub const DESTROY_OPERATORS: [&str; 12] = [
    "random_customer",
    "related_customer",
    "worst_customer",
    "random_route",
    "related_route",
    "worst_route",
    "random_vehicle",
    "related_vehicle",
    "worst_vehicle",
    "random_depot",
    "related_depot",
    "worst_depot",
];

pub const REPAIR_OPERATORS: [&str; 6] = [
    "best",
    "best_perturb",
    "greedy",
    "greedy_perturb",
    "regret2",
    "regret3",
];

pub const LOCAL_OPERATORS: [&str; 6] = [
    "move",
    "intra_opt",
    "inter_opt",
    "split",
    "swap_customers",
    "swap_depots",
];

pub fn destroy(name: &str) -> Result<RemovalOp, ConfigError> {
    let (target, policy) = match name {
        "random_customer" => (RemovalTarget::Customer, RemovalPolicy::Random),
        "related_customer" => (RemovalTarget::Customer, RemovalPolicy::Related),
        "worst_customer" => (RemovalTarget::Customer, RemovalPolicy::Worst),
        "random_route" => (RemovalTarget::Route, RemovalPolicy::Random),
        "related_route" => (RemovalTarget::Route, RemovalPolicy::Related),
        "worst_route" => (RemovalTarget::Route, RemovalPolicy::Worst),
        "random_vehicle" => (RemovalTarget::Vehicle, RemovalPolicy::Random),
        "related_vehicle" => (RemovalTarget::Vehicle, RemovalPolicy::Related),
        "worst_vehicle" => (RemovalTarget::Vehicle, RemovalPolicy::Worst),
        "random_depot" => (RemovalTarget::Depot, RemovalPolicy::Random),
        "related_depot" => (RemovalTarget::Depot, RemovalPolicy::Related),
        "worst_depot" => (RemovalTarget::Depot, RemovalPolicy::Worst),
        _ => {
            return Err(ConfigError::UnknownOperator {
                kind: "destroy",
                name: name.to_string(),
            });
        }
    };
    Ok(RemovalOp::new(target, policy))
}

pub fn repair(name: &str) -> Result<InsertionOp, ConfigError> {
    match name {
        "best" => Ok(InsertionOp::Best { perturb: false }),
        "best_perturb" => Ok(InsertionOp::Best { perturb: true }),
        "greedy" => Ok(InsertionOp::Greedy { perturb: false }),
        "greedy_perturb" => Ok(InsertionOp::Greedy { perturb: true }),
        "regret2" => Ok(InsertionOp::Regret { k: 2 }),
        "regret3" => Ok(InsertionOp::Regret { k: 3 }),
        _ => Err(ConfigError::UnknownOperator {
            kind: "repair",
            name: name.to_string(),
        }),
    }
}

pub fn local(name: &str) -> Result<LocalOp, ConfigError> {
    match name {
        "move" => Ok(LocalOp::Move),
        "intra_opt" => Ok(LocalOp::IntraOpt),
        "inter_opt" => Ok(LocalOp::InterOpt),
        "split" => Ok(LocalOp::Split),
        "swap_customers" => Ok(LocalOp::SwapCustomers),
        "swap_depots" => Ok(LocalOp::SwapDepots),
        _ => Err(ConfigError::UnknownOperator {
            kind: "local-search",
            name: name.to_string(),
        }),
    }
}
