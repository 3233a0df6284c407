// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

#[cfg(test)]
mod tests {
    use crate::common::Error;
    use crate::log::StringLogger;

    #[test]
    fn logger_tests() {
        println!("Testing logger");
        let log1 = StringLogger::default();

        let provider = "wechat";
        log1.trace(format!("loaded {provider}"));
        log1.trace(String::new());
        assert_eq!(log1.lines(), vec!["loaded wechat".to_string()]);
        assert!(!log1.contains_warnings());

        let shared = log1.clone();
        shared.warn(format!("skipped {provider}"));
        println!("Testing shared:\n{log1}");
        assert!(log1.contains_warnings());
        assert_eq!(log1.to_string(), "loaded wechat\nskipped wechat");
    }

    #[test]
    fn call_tests() {
        let log = StringLogger::new(true);
        let ok: Result<u8, Error> = Ok(1);
        assert_eq!(log.call("send".to_string(), ok), Ok(1));
        assert!(!log.contains_warnings());

        let err: Result<u8, Error> = Err(Error::Delivery(vec!["a@b.c".to_string()]));
        assert!(log.call("send".to_string(), err).is_err());
        assert!(log.contains_warnings());
        assert_eq!(
            log.lines(),
            vec![
                "send succeeded".to_string(),
                "send failed: Email (a@b.c) could not be sent".to_string()
            ]
        );
    }
}
