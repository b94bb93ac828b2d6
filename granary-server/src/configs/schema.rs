use crate::models::{
    DepotTable, GranaryConfigTable, GranaryDataTable, GranaryInfoTable, GranaryTable, Table,
    UserTable,
};

/// Orders table DDL so that every table is created after the tables it
/// references, and disposed before them.
pub struct SchemaManager {
    tables: Vec<Box<dyn Table>>,
}

impl SchemaManager {
    pub fn new(mut tables: Vec<Box<dyn Table>>) -> Self {
        Self::sort_tables(&mut tables);
        Self { tables }
    }

    fn sort_tables(tables: &mut Vec<Box<dyn Table>>) {
        let mut to_sort = std::mem::take(tables);
        let mut deps_list: Vec<_> = to_sort.iter().map(|t| t.dependencies()).collect();
        let mut sorted = Vec::with_capacity(to_sort.len());

        while !to_sort.is_empty() {
            let independent_indices: Vec<usize> = deps_list
                .iter()
                .enumerate()
                .filter(|(_, deps)| deps.is_empty())
                .map(|(i, _)| i)
                .collect();

            assert!(
                !independent_indices.is_empty(),
                "Circular dependency detected or unresolved dependencies exist."
            );

            for &index in independent_indices.iter().rev() {
                let table = to_sort.swap_remove(index);
                let _ = deps_list.swap_remove(index);
                sorted.push(table);
            }

            for deps in deps_list.iter_mut() {
                deps.retain(|dep_name| {
                    !sorted
                        .iter()
                        .any(|resolved_table| resolved_table.name() == *dep_name)
                });
            }
        }

        *tables = sorted;
    }

    pub fn table_names(&self) -> Vec<&'static str> {
        self.tables.iter().map(|table| table.name()).collect()
    }

    pub fn create_schema(&self) -> Vec<String> {
        self.tables.iter().map(|table| table.create()).collect()
    }

    pub fn dispose_schema(&self) -> Vec<String> {
        self.tables.iter().rev().map(|table| table.dispose()).collect()
    }
}

impl Default for SchemaManager {
    fn default() -> Self {
        SchemaManager::new(vec![
            Box::new(DepotTable),
            Box::new(GranaryTable),
            Box::new(GranaryConfigTable),
            Box::new(GranaryInfoTable),
            Box::new(GranaryDataTable),
            Box::new(UserTable),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(names: &[&str], name: &str) -> usize {
        names.iter().position(|n| *n == name).unwrap()
    }

    #[test]
    fn test_default_creation_order() {
        let manager = SchemaManager::default();
        let names = manager.table_names();

        assert_eq!(names.len(), 6);
        assert_eq!(names[0], "depots");
        assert!(position(&names, "granaries") < position(&names, "granary_configs"));
        assert!(position(&names, "granaries") < position(&names, "granary_infos"));
        assert!(position(&names, "granaries") < position(&names, "granary_data"));
        assert!(position(&names, "depots") < position(&names, "users"));
    }

    #[test]
    fn test_dispose_is_reverse_of_create() {
        let manager = SchemaManager::default();
        let dispose = manager.dispose_schema();

        assert_eq!(dispose.last().unwrap(), "DROP TABLE IF EXISTS depots;");
        assert_eq!(dispose.len(), manager.create_schema().len());
    }

    #[test]
    fn test_unordered_input_is_sorted() {
        let manager = SchemaManager::new(vec![
            Box::new(GranaryDataTable),
            Box::new(GranaryTable),
            Box::new(DepotTable),
        ]);

        assert_eq!(
            manager.table_names(),
            vec!["depots", "granaries", "granary_data"]
        );
    }
}
