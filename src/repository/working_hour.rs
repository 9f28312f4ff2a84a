use chrono::Weekday;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::types::{WorkingHourId, weekday_name};
use crate::domain::working_hour::WorkingHour;
use crate::models::working_hour::{WorkingHour as DbWorkingHour, WorkingHourChangeset};
use crate::repository::{
    DieselRepository, RepositoryResult, SqliteTransaction, WorkingHourReader, WorkingHourWriter,
};

fn find_for_day(conn: &mut SqliteConnection, day: Weekday) -> RepositoryResult<Option<WorkingHour>> {
    use crate::schema::working_hours;

    let row = working_hours::table
        .filter(working_hours::day_of_week.eq(weekday_name(day)))
        .first::<DbWorkingHour>(conn)
        .optional()?;

    Ok(row.map(TryInto::try_into).transpose()?)
}

fn find_by_id(
    conn: &mut SqliteConnection,
    id: WorkingHourId,
) -> RepositoryResult<Option<WorkingHour>> {
    use crate::schema::working_hours;

    let row = working_hours::table
        .filter(working_hours::id.eq(id.get()))
        .first::<DbWorkingHour>(conn)
        .optional()?;

    Ok(row.map(TryInto::try_into).transpose()?)
}

fn load_week(conn: &mut SqliteConnection) -> RepositoryResult<Vec<WorkingHour>> {
    use crate::schema::working_hours;

    let mut week = working_hours::table
        .load::<DbWorkingHour>(conn)?
        .into_iter()
        .map(TryInto::try_into)
        .collect::<Result<Vec<WorkingHour>, _>>()?;

    week.sort_by_key(|h| h.day_of_week.num_days_from_monday());
    Ok(week)
}

impl WorkingHourReader for DieselRepository {
    fn get_working_hours_for_day(&self, day: Weekday) -> RepositoryResult<Option<WorkingHour>> {
        self.with_conn(|conn| find_for_day(conn, day))
    }

    fn get_working_hour_by_id(&self, id: WorkingHourId) -> RepositoryResult<Option<WorkingHour>> {
        self.with_conn(|conn| find_by_id(conn, id))
    }

    fn list_working_hours(&self) -> RepositoryResult<Vec<WorkingHour>> {
        self.with_conn(load_week)
    }
}

impl WorkingHourReader for SqliteTransaction<'_> {
    fn get_working_hours_for_day(&self, day: Weekday) -> RepositoryResult<Option<WorkingHour>> {
        self.with_conn(|conn| find_for_day(conn, day))
    }

    fn get_working_hour_by_id(&self, id: WorkingHourId) -> RepositoryResult<Option<WorkingHour>> {
        self.with_conn(|conn| find_by_id(conn, id))
    }

    fn list_working_hours(&self) -> RepositoryResult<Vec<WorkingHour>> {
        self.with_conn(load_week)
    }
}

impl WorkingHourWriter for DieselRepository {
    fn update_working_hour(&self, hours: &WorkingHour) -> RepositoryResult<usize> {
        use crate::schema::working_hours;

        let mut conn = self.conn()?;

        let affected =
            diesel::update(working_hours::table.filter(working_hours::id.eq(hours.id.get())))
                .set(WorkingHourChangeset::from(hours))
                .execute(&mut conn)?;

        Ok(affected)
    }
}
