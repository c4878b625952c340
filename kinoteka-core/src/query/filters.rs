use std::collections::BTreeMap;

use kinoteka_model::MovieFilters;
use sqlx::{Postgres, QueryBuilder};

/// One filterable dimension of the movie aggregate join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterDimension {
    Genre,
    Category,
    MovieType,
    Age,
}

impl FilterDimension {
    pub const ALL: [FilterDimension; 4] = [
        FilterDimension::Genre,
        FilterDimension::Category,
        FilterDimension::MovieType,
        FilterDimension::Age,
    ];

    /// Identity column of the joined alias this dimension compares against.
    pub fn column(self) -> &'static str {
        match self {
            FilterDimension::Genre => "g.id",
            FilterDimension::Category => "c.id",
            FilterDimension::MovieType => "mt.id",
            FilterDimension::Age => "a.id",
        }
    }

    /// Parameter name used for logging and the parameter map.
    pub fn param_name(self) -> &'static str {
        match self {
            FilterDimension::Genre => "genreId",
            FilterDimension::Category => "categoryId",
            FilterDimension::MovieType => "typeId",
            FilterDimension::Age => "ageId",
        }
    }

    fn value(self, filters: &MovieFilters) -> &str {
        match self {
            FilterDimension::Genre => &filters.genre_id,
            FilterDimension::Category => &filters.category_id,
            FilterDimension::MovieType => &filters.type_id,
            FilterDimension::Age => &filters.age_id,
        }
    }
}

/// A single `AND <alias>.id = <param>` condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub dimension: FilterDimension,
    pub value: String,
}

/// Conjunctive predicates derived from request filters.
///
/// Built once per request and rendered onto a query that already ends in
/// `WHERE 1=1`. Values stay strings and are cast to `INTEGER` by the
/// database, so a non-numeric value surfaces as a database error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredicateSet {
    predicates: Vec<Predicate>,
}

impl PredicateSet {
    pub fn from_filters(filters: &MovieFilters) -> Self {
        let predicates = FilterDimension::ALL
            .into_iter()
            .filter_map(|dimension| {
                let value = dimension.value(filters);
                if value.is_empty() {
                    None
                } else {
                    Some(Predicate {
                        dimension,
                        value: value.to_string(),
                    })
                }
            })
            .collect();
        Self { predicates }
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Parameter name to raw value, for every active dimension.
    pub fn params(&self) -> BTreeMap<&'static str, &str> {
        self.predicates
            .iter()
            .map(|p| (p.dimension.param_name(), p.value.as_str()))
            .collect()
    }

    /// Append every predicate to `builder` with bound parameters.
    pub fn push_onto<'args>(&self, builder: &mut QueryBuilder<'args, Postgres>) {
        for predicate in &self.predicates {
            builder.push(" AND ");
            builder.push(predicate.dimension.column());
            builder.push(" = CAST(");
            builder.push_bind(predicate.value.clone());
            builder.push(" AS INTEGER)");
        }
    }
}
