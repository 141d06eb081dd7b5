use chrono::{NaiveDate, NaiveTime};
use roombook::db::Database;
use roombook::models::*;
use roombook::BookingError;
use speculate2::speculate;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("bad test date")
}

fn slot(start: &str, end: &str) -> TimeSlot {
    TimeSlot::new(
        NaiveTime::parse_from_str(start, "%H:%M").expect("bad test time"),
        NaiveTime::parse_from_str(end, "%H:%M").expect("bad test time"),
    )
    .expect("bad test slot")
}

fn add_room(db: &Database, name: &str, capacity: u32) -> Room {
    db.create_room(CreateRoomInput {
        name: name.to_string(),
        capacity,
    })
    .expect("Failed to create room")
}

speculate! {
    before {
        let db = Database::open_memory().expect("Failed to create in-memory database");
        db.migrate().expect("Failed to run migrations");
    }

    describe "rooms" {
        describe "create_room" {
            it "assigns an id and keeps the fields" {
                let room = add_room(&db, "Everest", 12);
                assert!(room.id > 0);
                assert_eq!(room.name, "Everest");
                assert_eq!(room.capacity, 12);
            }

            it "rejects duplicate names as a conflict" {
                add_room(&db, "Everest", 12);
                let err = db.create_room(CreateRoomInput {
                    name: "Everest".to_string(),
                    capacity: 3,
                }).unwrap_err();
                assert!(matches!(err, BookingError::Conflict(_)));
            }

            it "rejects zero capacity" {
                let err = db.create_room(CreateRoomInput {
                    name: "Closet".to_string(),
                    capacity: 0,
                }).unwrap_err();
                assert!(matches!(err, BookingError::Validation { .. }));
            }
        }

        describe "get_all_rooms" {
            it "returns empty list when no rooms exist" {
                let rooms = db.get_all_rooms().expect("Query failed");
                assert!(rooms.is_empty());
            }

            it "returns rooms in directory order" {
                add_room(&db, "Zermatt", 4);
                add_room(&db, "Alps", 8);

                let rooms = db.get_all_rooms().expect("Query failed");
                let names: Vec<_> = rooms.iter().map(|r| r.name.as_str()).collect();
                assert_eq!(names, vec!["Zermatt", "Alps"]);
            }
        }

        describe "get_room_by_name" {
            it "returns None for an unknown room" {
                assert!(db.get_room_by_name("Nowhere").expect("Query failed").is_none());
            }

            it "finds the room by exact name" {
                let created = add_room(&db, "Everest", 12);
                let found = db.get_room_by_name("Everest").expect("Query failed");
                assert_eq!(found, Some(created));
            }
        }

        describe "seed_rooms" {
            it "adds missing rooms and skips existing names" {
                add_room(&db, "Everest", 12);

                let added = db.seed_rooms(&[
                    CreateRoomInput { name: "Everest".to_string(), capacity: 99 },
                    CreateRoomInput { name: "K2".to_string(), capacity: 4 },
                ]).expect("Seed failed");

                assert_eq!(added, 1);
                let everest = db.get_room_by_name("Everest").unwrap().unwrap();
                assert_eq!(everest.capacity, 12);
                assert!(db.get_room_by_name("K2").unwrap().is_some());
            }

            it "is idempotent" {
                let rooms = vec![CreateRoomInput { name: "K2".to_string(), capacity: 4 }];
                assert_eq!(db.seed_rooms(&rooms).unwrap(), 1);
                assert_eq!(db.seed_rooms(&rooms).unwrap(), 0);
            }
        }
    }

    describe "conflict_checking" {
        it "reports a free room when nothing is booked" {
            let room = add_room(&db, "Everest", 12);
            let conflict = db.is_conflicting(room.id, date("2024-05-01"), &slot("09:00", "10:00"))
                .expect("Query failed");
            assert!(!conflict);
        }

        it "detects an overlapping reservation" {
            let room = add_room(&db, "Everest", 12);
            db.insert_reservation("Everest", date("2024-05-01"), slot("09:00", "10:30")).unwrap();

            assert!(db.is_conflicting(room.id, date("2024-05-01"), &slot("10:00", "11:00")).unwrap());
            assert!(db.is_conflicting(room.id, date("2024-05-01"), &slot("08:00", "09:30")).unwrap());
            assert!(db.is_conflicting(room.id, date("2024-05-01"), &slot("09:15", "09:45")).unwrap());
            assert!(db.is_conflicting(room.id, date("2024-05-01"), &slot("08:00", "12:00")).unwrap());
        }

        it "treats touching endpoints as free" {
            let room = add_room(&db, "Everest", 12);
            db.insert_reservation("Everest", date("2024-05-01"), slot("09:00", "10:00")).unwrap();

            assert!(!db.is_conflicting(room.id, date("2024-05-01"), &slot("10:00", "11:00")).unwrap());
            assert!(!db.is_conflicting(room.id, date("2024-05-01"), &slot("08:00", "09:00")).unwrap());
        }

        it "ignores other rooms and other dates" {
            let everest = add_room(&db, "Everest", 12);
            let k2 = add_room(&db, "K2", 4);
            db.insert_reservation("Everest", date("2024-05-01"), slot("09:00", "10:00")).unwrap();

            assert!(!db.is_conflicting(k2.id, date("2024-05-01"), &slot("09:00", "10:00")).unwrap());
            assert!(!db.is_conflicting(everest.id, date("2024-05-02"), &slot("09:00", "10:00")).unwrap());
        }
    }

    describe "reservations" {
        describe "insert_reservation" {
            it "persists and returns the reservation" {
                let room = add_room(&db, "Everest", 12);
                let created = db.insert_reservation("Everest", date("2024-05-01"), slot("09:00", "10:00"))
                    .expect("Insert failed");

                assert_eq!(created.room_id, room.id);
                assert_eq!(created.room_name, "Everest");

                let found = db.get_reservation(created.id).expect("Query failed");
                assert_eq!(found, Some(created));
            }

            it "fails with not found for an unknown room" {
                let err = db.insert_reservation("Nowhere", date("2024-05-01"), slot("09:00", "10:00"))
                    .unwrap_err();
                assert!(matches!(err, BookingError::NotFound(_)));
            }

            it "reports an inverted slot as a validation error" {
                add_room(&db, "Everest", 12);
                let inverted = TimeSlot {
                    start: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
                    end: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                };

                let err = db.insert_reservation("Everest", date("2024-05-01"), inverted).unwrap_err();
                assert!(matches!(err, BookingError::Validation { .. }));
                assert!(db.list_reservations(None, None).unwrap().is_empty());
            }

            it "fails with conflict and writes nothing when overlapping" {
                add_room(&db, "Everest", 12);
                db.insert_reservation("Everest", date("2024-05-01"), slot("09:00", "10:30")).unwrap();

                let err = db.insert_reservation("Everest", date("2024-05-01"), slot("10:00", "11:00"))
                    .unwrap_err();
                assert!(matches!(err, BookingError::Conflict(_)));
                assert_eq!(db.list_reservations(None, None).unwrap().len(), 1);
            }
        }

        describe "delete_reservation" {
            it "returns None for an unknown id" {
                assert!(db.delete_reservation(4242).expect("Delete failed").is_none());
            }

            it "removes the row and frees the slot" {
                let room = add_room(&db, "Everest", 12);
                let created = db.insert_reservation("Everest", date("2024-05-01"), slot("09:00", "10:00")).unwrap();

                let deleted = db.delete_reservation(created.id).expect("Delete failed");
                assert_eq!(deleted, Some(created.clone()));
                assert!(db.get_reservation(created.id).unwrap().is_none());
                assert!(!db.is_conflicting(room.id, date("2024-05-01"), &slot("09:00", "10:00")).unwrap());
            }
        }

        describe "list_reservations" {
            before {
                add_room(&db, "Everest", 12);
                add_room(&db, "Alps", 8);
                db.insert_reservation("Everest", date("2024-05-02"), slot("09:00", "10:00")).unwrap();
                db.insert_reservation("Everest", date("2024-05-01"), slot("14:00", "15:00")).unwrap();
                db.insert_reservation("Alps", date("2024-05-01"), slot("11:00", "12:00")).unwrap();
                db.insert_reservation("Everest", date("2024-05-01"), slot("08:00", "09:00")).unwrap();
            }

            it "orders the unfiltered list by room, date, start time" {
                let all = db.list_reservations(None, None).unwrap();
                let keys: Vec<_> = all.iter()
                    .map(|r| (r.room_name.as_str(), r.date.to_string(), r.start_time.to_string()))
                    .collect();
                assert_eq!(keys, vec![
                    ("Alps", "2024-05-01".to_string(), "11:00:00".to_string()),
                    ("Everest", "2024-05-01".to_string(), "08:00:00".to_string()),
                    ("Everest", "2024-05-01".to_string(), "14:00:00".to_string()),
                    ("Everest", "2024-05-02".to_string(), "09:00:00".to_string()),
                ]);
            }

            it "filters by room ordered by date and start time" {
                let everest = db.list_reservations(Some("Everest"), None).unwrap();
                assert_eq!(everest.len(), 3);
                assert!(everest.iter().all(|r| r.room_name == "Everest"));
                assert!(everest.windows(2).all(|w| (w[0].date, w[0].start_time) <= (w[1].date, w[1].start_time)));
            }

            it "filters by date" {
                let first = db.list_reservations(None, Some(date("2024-05-01"))).unwrap();
                assert_eq!(first.len(), 3);
                assert_eq!(first[0].room_name, "Alps");
            }

            it "filters by room and date" {
                let both = db.list_reservations(Some("Everest"), Some(date("2024-05-01"))).unwrap();
                let starts: Vec<_> = both.iter().map(|r| r.start_time.to_string()).collect();
                assert_eq!(starts, vec!["08:00:00", "14:00:00"]);
            }

            it "returns nothing for an unknown room" {
                assert!(db.list_reservations(Some("Nowhere"), None).unwrap().is_empty());
            }
        }
    }
}
